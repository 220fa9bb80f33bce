// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Brand, template, and per-session variable configuration queries.

use rusqlite::params;
use zapcast_core::ZapcastError;

use crate::database::Database;
use crate::models::{Brand, StaticVariable, TemplateReference, VariableMapping};

pub async fn create_brand(db: &Database, brand: &Brand) -> Result<(), ZapcastError> {
    let brand = brand.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO brands (id, name, prefix, from_number) VALUES (?1, ?2, ?3, ?4)",
                params![brand.id, brand.name, brand.prefix, brand.from_number],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn get_brand(db: &Database, id: &str) -> Result<Option<Brand>, ZapcastError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, prefix, from_number FROM brands WHERE id = ?1")?;
            let result = stmt.query_row(params![id], |row| {
                Ok(Brand {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    prefix: row.get(2)?,
                    from_number: row.get(3)?,
                })
            });
            match result {
                Ok(brand) => Ok(Some(brand)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn create_template_reference(
    db: &Database,
    template: &TemplateReference,
) -> Result<(), ZapcastError> {
    let template = template.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO template_references (id, provider_template_id, name, has_variables)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    template.id,
                    template.provider_template_id,
                    template.name,
                    template.has_variables,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn get_template_reference(
    db: &Database,
    id: &str,
) -> Result<Option<TemplateReference>, ZapcastError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, provider_template_id, name, has_variables
                 FROM template_references WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], |row| {
                Ok(TemplateReference {
                    id: row.get(0)?,
                    provider_template_id: row.get(1)?,
                    name: row.get(2)?,
                    has_variables: row.get(3)?,
                })
            });
            match result {
                Ok(template) => Ok(Some(template)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn add_variable_mapping(
    db: &Database,
    mapping: &VariableMapping,
) -> Result<(), ZapcastError> {
    let mapping = mapping.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO variable_mappings (session_id, variable, column_key)
                 VALUES (?1, ?2, ?3)",
                params![mapping.session_id, mapping.variable, mapping.column_key],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Mappings for a session in insertion order. Later mappings for the same
/// variable override earlier ones at resolution time.
pub async fn get_variable_mappings(
    db: &Database,
    session_id: &str,
) -> Result<Vec<VariableMapping>, ZapcastError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT session_id, variable, column_key FROM variable_mappings
                 WHERE session_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![session_id], |row| {
                Ok(VariableMapping {
                    session_id: row.get(0)?,
                    variable: row.get(1)?,
                    column_key: row.get(2)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Insert or replace the static value for `(session_id, variable)`.
pub async fn upsert_static_variable(
    db: &Database,
    var: &StaticVariable,
) -> Result<(), ZapcastError> {
    let var = var.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO static_variables (session_id, variable, value)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT (session_id, variable) DO UPDATE SET value = excluded.value",
                params![var.session_id, var.variable, var.value],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

pub async fn get_static_variables(
    db: &Database,
    session_id: &str,
) -> Result<Vec<StaticVariable>, ZapcastError> {
    let session_id = session_id.to_string();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT session_id, variable, value FROM static_variables
                 WHERE session_id = ?1 ORDER BY id ASC",
            )?;
            let rows = stmt.query_map(params![session_id], |row| {
                Ok(StaticVariable {
                    session_id: row.get(0)?,
                    variable: row.get(1)?,
                    value: row.get(2)?,
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
