use std::backtrace::Backtrace;

use async_trait::async_trait;
use rocket::serde::json::serde_json::{self, Value};
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::model::error::remote_errors::RemoteError;
use crate::remote::{Document, DocumentCollection, Fields};
use crate::repository::open_connection;

/// [`DocumentCollection`] backed by the `documents` table of a sqlite database.
/// Documents are stored as json bodies and queried with `json_extract`.
/// A connection is opened per call, same as every other repository function
pub struct SqliteCollection {
    location: String,
}

impl SqliteCollection {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }

    fn connection(&self) -> Result<Connection, RemoteError> {
        open_connection(&self.location).map_err(|e| {
            log::error!(
                "Failed to open a connection to {}! Error is {e:?}\n{}",
                self.location,
                Backtrace::force_capture()
            );
            RemoteError::from(e)
        })
    }
}

/// pulls the (id, body) pair out of a document row
fn document_mapper(row: &Row) -> rusqlite::Result<(String, String)> {
    Ok((row.get(0)?, row.get(1)?))
}

/// A body that isn't a json object comes back as a document with no fields. The row still
/// exists, so the collection doesn't look empty to callers that seed on empty
fn parse_documents(rows: Vec<(String, String)>) -> Vec<Document> {
    rows.into_iter()
        .map(|(id, body)| match serde_json::from_str::<Fields>(&body) {
            Ok(fields) => Document::new(id, fields),
            Err(e) => {
                log::warn!("Document {id} has a body that is not a json object, reading it as empty: {e}");
                Document::new(id, Fields::new())
            }
        })
        .collect()
}

/// writes a body as-is, bypassing json serialization
#[cfg(test)]
pub fn insert_raw_document(location: &str, collection: &str, id: &str, body: &str) {
    let con = open_connection(location).unwrap();
    con.execute(
        include_str!("../assets/queries/documents/set_document.sql"),
        rusqlite::params![collection, id, body],
    )
    .unwrap();
    con.close().unwrap();
}

/// converts a json value into something sqlite will compare equal to the output of `json_extract`
fn to_sql_value(value: &Value) -> SqlValue {
    match value {
        Value::Null => SqlValue::Null,
        Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
        Value::Number(n) => match n.as_i64() {
            Some(i) => SqlValue::Integer(i),
            None => SqlValue::Real(n.as_f64().unwrap_or_default()),
        },
        Value::String(s) => SqlValue::Text(s.clone()),
        // nested values come back from json_extract as their json text
        other => SqlValue::Text(other.to_string()),
    }
}

fn json_path(field: &str) -> String {
    format!("$.{field}")
}

#[async_trait]
impl DocumentCollection for SqliteCollection {
    async fn order_by(&self, collection: &str, field: &str) -> Result<Vec<Document>, RemoteError> {
        let con = self.connection()?;
        let rows = {
            let mut pst = con.prepare(include_str!(
                "../assets/queries/documents/order_by.sql"
            ))?;
            let rows = pst
                .query_map(rusqlite::params![collection, json_path(field)], document_mapper)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };
        con.close().map_err(|(_, e)| RemoteError::from(e))?;
        Ok(parse_documents(rows))
    }

    async fn where_equal_to(
        &self,
        collection: &str,
        filters: &[(&str, Value)],
    ) -> Result<Vec<Document>, RemoteError> {
        let mut sql = String::from(include_str!(
            "../assets/queries/documents/filter_base.sql"
        ));
        let mut params: Vec<SqlValue> = vec![SqlValue::Text(collection.to_string())];
        for (field, value) in filters {
            let path_index = params.len() + 1;
            sql.push_str(&format!(
                "  and json_extract(case when json_valid(body) then body else '{{}}' end, ?{path_index}) = ?{}\n",
                path_index + 1
            ));
            params.push(SqlValue::Text(json_path(field)));
            params.push(to_sql_value(value));
        }
        sql.push_str("order by id");
        let con = self.connection()?;
        let rows = {
            let mut pst = con.prepare(&sql)?;
            let rows = pst
                .query_map(rusqlite::params_from_iter(params), document_mapper)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            rows
        };
        con.close().map_err(|(_, e)| RemoteError::from(e))?;
        Ok(parse_documents(rows))
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, RemoteError> {
        let con = self.connection()?;
        let row = con
            .query_row(
                include_str!("../assets/queries/documents/get_by_id.sql"),
                rusqlite::params![collection, id],
                document_mapper,
            )
            .optional()?;
        con.close().map_err(|(_, e)| RemoteError::from(e))?;
        Ok(row.and_then(|row| parse_documents(vec![row]).pop()))
    }

    async fn commit_batch(
        &self,
        collection: &str,
        documents: Vec<Document>,
    ) -> Result<(), RemoteError> {
        let mut con = self.connection()?;
        {
            let tx = con.transaction()?;
            for document in &documents {
                let body = Value::Object(document.fields.clone()).to_string();
                tx.execute(
                    include_str!("../assets/queries/documents/set_document.sql"),
                    rusqlite::params![collection, document.id, body],
                )?;
            }
            tx.commit()?;
        }
        con.close().map_err(|(_, e)| RemoteError::from(e))?;
        Ok(())
    }

    async fn add(&self, collection: &str, fields: Fields) -> Result<String, RemoteError> {
        let id = uuid::Uuid::new_v4().simple().to_string();
        let body = Value::Object(fields).to_string();
        let con = self.connection()?;
        con.execute(
            include_str!("../assets/queries/documents/set_document.sql"),
            rusqlite::params![collection, id, body],
        )?;
        con.close().map_err(|(_, e)| RemoteError::from(e))?;
        Ok(id)
    }
}
