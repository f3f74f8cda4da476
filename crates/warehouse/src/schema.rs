//! Table definitions and DDL rendering
//!
//! A [`TableDef`] declares the columns of a destination table. It renders
//! to ClickHouse DDL and doubles as the validation contract for inserts:
//! rows are checked against the definition before shipping, mirroring what
//! the warehouse would reject server-side.

use serde_json::Value;

use crate::error::RowError;

/// Column data type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    /// Variable-length string
    String,
    /// Calendar date (ISO-8601 `YYYY-MM-DD` on the wire)
    Date,
}

/// Column mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMode {
    /// Value must be present and non-null
    Required,
    /// Value may be null or absent
    Nullable,
}

/// A single column definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Column name as it appears in the warehouse
    pub name: String,
    /// Column data type
    pub field_type: FieldType,
    /// Required or nullable
    pub mode: FieldMode,
}

impl Field {
    /// A required column
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            mode: FieldMode::Required,
        }
    }

    /// A nullable column
    pub fn nullable(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            mode: FieldMode::Nullable,
        }
    }

    /// ClickHouse column type for this field
    fn column_type(&self) -> String {
        let base = match self.field_type {
            FieldType::String => "String",
            FieldType::Date => "Date",
        };
        match self.mode {
            FieldMode::Required => base.to_string(),
            FieldMode::Nullable => format!("Nullable({base})"),
        }
    }
}

/// A destination table definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDef {
    /// Table name (unqualified; the warehouse supplies the database)
    pub name: String,
    /// Columns in declaration order; the first is the sort key
    pub fields: Vec<Field>,
}

impl TableDef {
    /// Create a definition
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Render the CREATE TABLE statement
    ///
    /// Deliberately no `IF NOT EXISTS`: pre-existence surfaces as an
    /// engine error that callers recognize via
    /// [`WarehouseError::is_already_exists`].
    ///
    /// [`WarehouseError::is_already_exists`]: crate::WarehouseError::is_already_exists
    pub fn create_ddl(&self, database: &str) -> String {
        let columns: Vec<String> = self
            .fields
            .iter()
            .map(|f| format!("    `{}` {}", f.name, f.column_type()))
            .collect();

        let order_by = self
            .fields
            .first()
            .map(|f| f.name.as_str())
            .unwrap_or("tuple()");

        format!(
            "CREATE TABLE {database}.{name} (\n{columns}\n) ENGINE = MergeTree()\nORDER BY `{order_by}`",
            name = self.name,
            columns = columns.join(",\n"),
        )
    }

    /// Validate one row against this definition
    ///
    /// Returns the rejections the warehouse would produce for this row:
    /// null/missing values in required columns, type mismatches, and
    /// columns the table does not have.
    pub fn validate_row(&self, index: usize, row: &Value) -> Vec<RowError> {
        let Some(object) = row.as_object() else {
            return vec![RowError::row(index, "row is not a JSON object")];
        };

        let mut errors = Vec::new();

        for key in object.keys() {
            if self.field(key).is_none() {
                errors.push(RowError::column(index, key.clone(), "unknown column"));
            }
        }

        for field in &self.fields {
            let value = object.get(&field.name).unwrap_or(&Value::Null);

            if value.is_null() {
                if field.mode == FieldMode::Required {
                    errors.push(RowError::column(
                        index,
                        field.name.clone(),
                        "null in required column",
                    ));
                }
                continue;
            }

            let ok = match field.field_type {
                FieldType::String => value.is_string(),
                FieldType::Date => value.as_str().is_some_and(is_date_literal),
            };

            if !ok {
                errors.push(RowError::column(
                    index,
                    field.name.clone(),
                    format!("type mismatch: expected {:?}", field.field_type),
                ));
            }
        }

        errors
    }
}

/// Check for an ISO-8601 calendar date literal (`YYYY-MM-DD`)
fn is_date_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|&i| bytes[i].is_ascii_digit())
}

#[cfg(test)]
#[path = "schema_test.rs"]
mod schema_test;
