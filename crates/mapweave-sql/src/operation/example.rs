use super::{
    base::{columns, not_null},
    COUNT_RESULT_TYPE,
};
use crate::{
    serializer::{Comma, Ident, Param, Serializer},
    statement::Statement,
};

use mapweave_core::{resolve::BASE_RESULT_MAP, Result, TableContext};

pub(super) fn select_by_example(s: &Serializer, cx: &TableContext) -> Result<String> {
    let mut stmt = Statement::open(
        s,
        "select",
        &[
            ("id", Some("selectByExample")),
            ("resultMap", Some(BASE_RESULT_MAP)),
        ],
    );
    stmt.line("SELECT");
    stmt.when("distinct", |stmt| {
        stmt.line("DISTINCT");
    });
    stmt.line(columns(cx));
    stmt.line(("FROM ", Ident(cx.table())));
    stmt.when("_parameter != null", |stmt| {
        criteria(stmt, "");
    });
    stmt.when("orderByClause != null", |stmt| {
        stmt.line("ORDER BY ${orderByClause}");
    });
    Ok(stmt.finish())
}

pub(super) fn count_by_example(s: &Serializer, cx: &TableContext) -> Result<String> {
    let mut stmt = Statement::open(
        s,
        "select",
        &[
            ("id", Some("countByExample")),
            ("resultType", Some(COUNT_RESULT_TYPE)),
        ],
    );
    stmt.line(("SELECT COUNT(*) FROM ", Ident(cx.table())));
    stmt.when("_parameter != null", |stmt| {
        criteria(stmt, "");
    });
    Ok(stmt.finish())
}

pub(super) fn delete_by_example(s: &Serializer, cx: &TableContext) -> Result<String> {
    let mut stmt = Statement::open(s, "delete", &[("id", Some("deleteByExample"))]);
    stmt.line(("DELETE FROM ", Ident(cx.table())));
    stmt.when("_parameter != null", |stmt| {
        criteria(stmt, "");
    });
    Ok(stmt.finish())
}

pub(super) fn update_by_example(s: &Serializer, cx: &TableContext) -> Result<String> {
    let mut stmt = Statement::open(s, "update", &[("id", Some("updateByExample"))]);
    stmt.line(("UPDATE ", Ident(cx.table())));
    stmt.line((
        "SET ",
        Comma(
            cx.columns()
                .iter()
                .map(|c| (Ident(&c.column), " = ", Param::prefixed(c, "record."))),
        ),
    ));
    stmt.when("_parameter != null", |stmt| {
        criteria(stmt, "example.");
    });
    Ok(stmt.finish())
}

pub(super) fn update_by_example_selective(s: &Serializer, cx: &TableContext) -> Result<String> {
    let mut stmt = Statement::open(
        s,
        "update",
        &[("id", Some("updateByExampleSelective"))],
    );
    stmt.line(("UPDATE ", Ident(cx.table())));
    stmt.element("set", &[], |stmt| {
        for column in cx.columns() {
            stmt.when(&not_null("record.", column), |stmt| {
                stmt.line((
                    Ident(&column.column),
                    " = ",
                    Param::prefixed(column, "record."),
                    ",",
                ));
            });
        }
    });
    stmt.when("_parameter != null", |stmt| {
        criteria(stmt, "example.");
    });
    Ok(stmt.finish())
}

/// The example's `oredCriteria`, inlined so the statement needs no
/// `<include>`. Criteria groups are OR-ed; criteria in a group are AND-ed.
fn criteria(stmt: &mut Statement<'_>, prefix: &str) {
    let collection = format!("{prefix}oredCriteria");

    stmt.element("where", &[], |stmt| {
        stmt.element(
            "foreach",
            &[
                ("collection", collection.as_str()),
                ("item", "criteria"),
                ("separator", "or"),
            ],
            |stmt| {
                stmt.when("criteria.valid", |stmt| {
                    stmt.element(
                        "trim",
                        &[("prefix", "("), ("suffix", ")"), ("prefixOverrides", "and")],
                        |stmt| {
                            stmt.element(
                                "foreach",
                                &[("collection", "criteria.criteria"), ("item", "criterion")],
                                criterion,
                            );
                        },
                    );
                });
            },
        );
    });
}

fn criterion(stmt: &mut Statement<'_>) {
    stmt.element("choose", &[], |stmt| {
        stmt.element("when", &[("test", "criterion.noValue")], |stmt| {
            stmt.line("and ${criterion.condition}");
        });
        stmt.element("when", &[("test", "criterion.singleValue")], |stmt| {
            stmt.line("and ${criterion.condition} #{criterion.value}");
        });
        stmt.element("when", &[("test", "criterion.betweenValue")], |stmt| {
            stmt.line("and ${criterion.condition} #{criterion.value} and #{criterion.secondValue}");
        });
        stmt.element("when", &[("test", "criterion.listValue")], |stmt| {
            stmt.line("and ${criterion.condition}");
            stmt.element(
                "foreach",
                &[
                    ("collection", "criterion.value"),
                    ("item", "listItem"),
                    ("open", "("),
                    ("close", ")"),
                    ("separator", ","),
                ],
                |stmt| {
                    stmt.line("#{listItem}");
                },
            );
        });
    });
}
