mod base;
mod example;

use crate::serializer::Serializer;

use mapweave_core::{Result, TableContext};

/// Renders one operation's statement.
pub(crate) type Render = fn(&Serializer, &TableContext) -> Result<String>;

/// Every operation the default templates cover, by name.
pub(crate) const OPERATIONS: &[(&str, Render)] = &[
    ("insert", base::insert),
    ("insertSelective", base::insert_selective),
    ("selectByPrimaryKey", base::select_by_primary_key),
    ("updateByPrimaryKey", base::update_by_primary_key),
    ("updateByPrimaryKeySelective", base::update_by_primary_key_selective),
    ("deleteByPrimaryKey", base::delete_by_primary_key),
    ("selectByQuery", base::select_by_query),
    ("countByQuery", base::count_by_query),
    ("selectByExample", example::select_by_example),
    ("countByExample", example::count_by_example),
    ("deleteByExample", example::delete_by_example),
    ("updateByExample", example::update_by_example),
    ("updateByExampleSelective", example::update_by_example_selective),
];

/// Result type of `count*` statements
const COUNT_RESULT_TYPE: &str = "java.lang.Long";
