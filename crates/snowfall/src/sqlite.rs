//! `rusqlite` column binding, following the rules in [`ColumnValue`].

use crate::{ColumnValue, NullSnowflake, Snowflake};
use rusqlite::types::{
    FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef,
};

fn to_column_value(value: ValueRef<'_>) -> FromSqlResult<ColumnValue> {
    Ok(match value {
        ValueRef::Null => ColumnValue::Null,
        ValueRef::Integer(v) => ColumnValue::Integer(v),
        ValueRef::Real(v) => ColumnValue::Real(v),
        ValueRef::Text(bytes) => {
            let text =
                std::str::from_utf8(bytes).map_err(|e| FromSqlError::Other(Box::new(e)))?;
            ColumnValue::Text(text.to_owned())
        }
        ValueRef::Blob(_) => return Err(FromSqlError::InvalidType),
    })
}

fn convert<T>(
    value: ValueRef<'_>,
    f: impl FnOnce(&ColumnValue) -> crate::Result<T>,
) -> FromSqlResult<T> {
    let column = to_column_value(value)?;
    f(&column).map_err(|e| match e {
        crate::Error::ColumnType { .. } => FromSqlError::InvalidType,
        other => FromSqlError::Other(Box::new(other)),
    })
}

fn to_sql_output(column: ColumnValue) -> ToSqlOutput<'static> {
    ToSqlOutput::Owned(match column {
        ColumnValue::Null => Value::Null,
        ColumnValue::Integer(v) => Value::Integer(v),
        ColumnValue::Real(v) => Value::Real(v),
        ColumnValue::Text(v) => Value::Text(v),
        ColumnValue::Blob(v) => Value::Blob(v),
    })
}

impl FromSql for Snowflake {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        convert(value, Snowflake::from_column)
    }
}

impl ToSql for Snowflake {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(to_sql_output(self.to_column()))
    }
}

impl FromSql for NullSnowflake {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        convert(value, NullSnowflake::from_column)
    }
}

impl ToSql for NullSnowflake {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(to_sql_output(self.to_column()))
    }
}
