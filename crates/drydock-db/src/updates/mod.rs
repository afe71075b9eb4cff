//! Update types for entity mutations.
//!
//! Each update struct has `Option` fields. Only `Some` fields generate SET
//! clauses in the dynamic UPDATE SQL; absent fields leave their column
//! untouched. Nullable columns use `Option<Option<T>>` so that an explicit
//! `null` clears the column.

pub mod repair;

/// Accumulates `column = ?N` clauses and their positional parameters.
#[derive(Debug, Default)]
pub struct Assignments {
    sets: Vec<String>,
    params: Vec<libsql::Value>,
}

impl Assignments {
    pub fn push(&mut self, column: &str, value: libsql::Value) {
        self.params.push(value);
        self.sets.push(format!("{column} = ?{}", self.params.len()));
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Column names assigned so far, in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.sets
            .iter()
            .filter_map(|s| s.split_once(" = ").map(|(col, _)| col))
    }

    /// Render `UPDATE {table} SET ... WHERE {key} = ?N` and its parameters.
    #[must_use]
    pub fn into_update(
        mut self,
        table: &str,
        key: &str,
        key_value: libsql::Value,
    ) -> (String, Vec<libsql::Value>) {
        self.params.push(key_value);
        let sql = format!(
            "UPDATE {table} SET {} WHERE {key} = ?{}",
            self.sets.join(", "),
            self.params.len()
        );
        (sql, self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_numbered_placeholders() {
        let mut a = Assignments::default();
        a.push("location", libsql::Value::Text("Miami".into()));
        a.push("ticket", libsql::Value::Null);

        let (sql, params) = a.into_update("repairs", "id", libsql::Value::Integer(4));
        assert_eq!(
            sql,
            "UPDATE repairs SET location = ?1, ticket = ?2 WHERE id = ?3"
        );
        assert_eq!(params.len(), 3);
    }
}
