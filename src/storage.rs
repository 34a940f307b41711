// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Fallible;
use crate::types::timestamp::Timestamp;

/// A flat key-value store of string blobs, kept in a SQLite file.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating storage schema.");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Read the value stored under `key`, if any.
    pub fn get_item(&self, key: &str) -> Fallible<Option<String>> {
        let sql = "select value from items where key = ?;";
        let value: Option<String> = self
            .conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    /// Store `value` under `key`, replacing any previous value.
    pub fn set_item(&self, key: &str, value: &str) -> Fallible<()> {
        let sql = "insert into items (key, value, updated_at) values (?, ?, ?) on conflict (key) do update set value = excluded.value, updated_at = excluded.updated_at;";
        self.conn.execute(sql, (key, value, Timestamp::now()))?;
        Ok(())
    }

    /// When the value under `key` was last written.
    pub fn updated_at(&self, key: &str) -> Fallible<Option<Timestamp>> {
        let sql = "select updated_at from items where key = ?;";
        let ts: Option<Timestamp> = self
            .conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(ts)
    }

    /// Read and deserialize a JSON blob.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Fallible<Option<T>> {
        match self.get_item(key)? {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    /// Serialize a value as JSON and store it.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Fallible<()> {
        let json = serde_json::to_string(value)?;
        self.set_item(key, &json)
    }

    /// Make every later write fail. Reads keep working.
    #[cfg(test)]
    pub fn set_read_only(&self) -> Fallible<()> {
        self.conn.execute_batch("pragma query_only = 1;")?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["items"], |row| row.get(0))?;
    Ok(count > 0)
}
