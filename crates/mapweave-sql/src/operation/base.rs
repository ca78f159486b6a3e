use super::COUNT_RESULT_TYPE;
use crate::{
    serializer::{Comma, Ident, Param, Serializer},
    statement::Statement,
};

use mapweave_core::{resolve::BASE_RESULT_MAP, ColumnMapping, Result, TableContext};

pub(super) fn insert(s: &Serializer, cx: &TableContext) -> Result<String> {
    let mut stmt = Statement::open(
        s,
        "insert",
        &[("id", Some("insert")), ("parameterType", cx.entity_type())],
    );
    stmt.line((
        "INSERT INTO ",
        Ident(cx.table()),
        " (",
        Comma(cx.columns().iter().map(|c| Ident(&c.column))),
        ")",
    ));
    stmt.line((
        "VALUES (",
        Comma(cx.columns().iter().map(Param::new)),
        ")",
    ));
    Ok(stmt.finish())
}

pub(super) fn insert_selective(s: &Serializer, cx: &TableContext) -> Result<String> {
    let mut stmt = Statement::open(
        s,
        "insert",
        &[
            ("id", Some("insertSelective")),
            ("parameterType", cx.entity_type()),
        ],
    );
    stmt.line(("INSERT INTO ", Ident(cx.table())));
    stmt.element(
        "trim",
        &[("prefix", "("), ("suffix", ")"), ("suffixOverrides", ",")],
        |stmt| {
            for column in cx.columns() {
                stmt.when(&not_null("", column), |stmt| {
                    stmt.line((Ident(&column.column), ","));
                });
            }
        },
    );
    stmt.element(
        "trim",
        &[
            ("prefix", "VALUES ("),
            ("suffix", ")"),
            ("suffixOverrides", ","),
        ],
        |stmt| {
            for column in cx.columns() {
                stmt.when(&not_null("", column), |stmt| {
                    stmt.line((Param::new(column), ","));
                });
            }
        },
    );
    Ok(stmt.finish())
}

pub(super) fn select_by_primary_key(s: &Serializer, cx: &TableContext) -> Result<String> {
    let id = cx.identity()?;
    let mut stmt = Statement::open(
        s,
        "select",
        &[
            ("id", Some("selectByPrimaryKey")),
            ("parameterType", cx.key_type()),
            ("resultMap", Some(BASE_RESULT_MAP)),
        ],
    );
    stmt.line(("SELECT ", columns(cx)));
    stmt.line(("FROM ", Ident(cx.table())));
    stmt.line(key_condition(id));
    Ok(stmt.finish())
}

pub(super) fn update_by_primary_key(s: &Serializer, cx: &TableContext) -> Result<String> {
    let id = cx.identity()?;
    let mut stmt = Statement::open(
        s,
        "update",
        &[
            ("id", Some("updateByPrimaryKey")),
            ("parameterType", cx.entity_type()),
        ],
    );
    stmt.line(("UPDATE ", Ident(cx.table())));
    stmt.line((
        "SET ",
        Comma(
            cx.non_identity_columns()
                .map(|c| (Ident(&c.column), " = ", Param::new(c))),
        ),
    ));
    stmt.line(key_condition(id));
    Ok(stmt.finish())
}

pub(super) fn update_by_primary_key_selective(
    s: &Serializer,
    cx: &TableContext,
) -> Result<String> {
    let id = cx.identity()?;
    let mut stmt = Statement::open(
        s,
        "update",
        &[
            ("id", Some("updateByPrimaryKeySelective")),
            ("parameterType", cx.entity_type()),
        ],
    );
    stmt.line(("UPDATE ", Ident(cx.table())));
    stmt.element("set", &[], |stmt| {
        for column in cx.non_identity_columns() {
            stmt.when(&not_null("", column), |stmt| {
                stmt.line((Ident(&column.column), " = ", Param::new(column), ","));
            });
        }
    });
    stmt.line(key_condition(id));
    Ok(stmt.finish())
}

pub(super) fn delete_by_primary_key(s: &Serializer, cx: &TableContext) -> Result<String> {
    let id = cx.identity()?;
    let mut stmt = Statement::open(
        s,
        "delete",
        &[
            ("id", Some("deleteByPrimaryKey")),
            ("parameterType", cx.key_type()),
        ],
    );
    stmt.line(("DELETE FROM ", Ident(cx.table())));
    stmt.line(key_condition(id));
    Ok(stmt.finish())
}

pub(super) fn select_by_query(s: &Serializer, cx: &TableContext) -> Result<String> {
    let mut stmt = Statement::open(
        s,
        "select",
        &[
            ("id", Some("selectByQuery")),
            ("resultMap", Some(BASE_RESULT_MAP)),
        ],
    );
    stmt.line(("SELECT ", columns(cx)));
    stmt.line(("FROM ", Ident(cx.table())));
    query_filter(&mut stmt, cx);
    Ok(stmt.finish())
}

pub(super) fn count_by_query(s: &Serializer, cx: &TableContext) -> Result<String> {
    let mut stmt = Statement::open(
        s,
        "select",
        &[
            ("id", Some("countByQuery")),
            ("resultType", Some(COUNT_RESULT_TYPE)),
        ],
    );
    stmt.line(("SELECT COUNT(*) FROM ", Ident(cx.table())));
    query_filter(&mut stmt, cx);
    Ok(stmt.finish())
}

/// Equality filter on every property set on the query object
fn query_filter(stmt: &mut Statement<'_>, cx: &TableContext) {
    stmt.element("where", &[], |stmt| {
        for column in cx.columns() {
            stmt.when(&not_null("", column), |stmt| {
                stmt.line(("AND ", Ident(&column.column), " = ", Param::new(column)));
            });
        }
    });
}

pub(super) fn columns(cx: &TableContext) -> Comma<impl Iterator<Item = Ident<&String>> + '_> {
    Comma(cx.columns().iter().map(|c| Ident(&c.column)))
}

fn key_condition(id: &ColumnMapping) -> (&'static str, Ident<&String>, &'static str, Param<'_>) {
    ("WHERE ", Ident(&id.column), " = ", Param::new(id))
}

/// `prefix.property != null`
pub(super) fn not_null(prefix: &str, column: &ColumnMapping) -> String {
    format!("{prefix}{} != null", column.property)
}
