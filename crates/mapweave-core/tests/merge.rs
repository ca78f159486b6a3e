use mapweave_core::{
    Contract, ContractBinding, Document, KeyTypePolicy, Merger, TableContext, Templates,
    TypeCatalog, TypeDescriptor,
};
use pretty_assertions::assert_eq;
use std::collections::BTreeSet;

const USER_MAPPER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE mapper PUBLIC "-//mybatis.org//DTD Mapper 3.0//EN" "http://mybatis.org/dtd/mybatis-3-mapper.dtd">
<mapper namespace="com.acme.UserMapper">
    <resultMap id="BaseResultMap" type="com.acme.User">
        <id column="id" jdbcType="BIGINT" property="id"/>
        <result column="user_name" jdbcType="VARCHAR" property="userName"/>
    </resultMap>
    <select id="selectByPrimaryKey" resultMap="BaseResultMap">SELECT 1</select>
</mapper>
"#;

const ORDER_MAPPER: &str = r#"<mapper namespace="com.acme.OrderMapper">
  <resultMap id="BaseResultMap" type="com.acme.Order">
    <id column="order_id" jdbcType="BIGINT" property="orderId"/>
    <result column="total" jdbcType="DECIMAL" property="total"/>
  </resultMap>
</mapper>
"#;

/// Renders a minimal statement for every contract operation. Key-based
/// statements mention the key type and key column so tests can see what
/// the template was given.
fn templates() -> Templates {
    let mut templates = Templates::new();

    for contract in Contract::ALL {
        for operation in contract.operations() {
            let operation = *operation;
            templates.register(operation, move |cx: &TableContext| {
                let key = match cx.key_type() {
                    Some(key_type) => format!(
                        " parameterType=\"{key_type}\" key=\"{}\"",
                        cx.identity()?.column
                    ),
                    None => String::new(),
                };
                Ok(format!(
                    "<statement id=\"{operation}\"{key}>\n    /* {operation} */ {}\n</statement>",
                    cx.table()
                ))
            });
        }
    }

    templates
}

fn base() -> ContractBinding {
    ContractBinding::Base {
        entity: "com.acme.User".into(),
        query: "com.acme.UserQuery".into(),
        key: "java.lang.Long".into(),
    }
}

fn catalog() -> TypeCatalog {
    TypeCatalog::new()
        .with(
            TypeDescriptor::new("com.acme.UserMapper")
                .table("sys_user")
                .implements(base())
                .implements(ContractBinding::Example {
                    entity: "com.acme.User".into(),
                }),
        )
        .with(
            TypeDescriptor::new("com.acme.OrderMapper")
                .table("orders")
                .implements(ContractBinding::PrimaryKey {
                    entity: "com.acme.Order".into(),
                    key: "Long".into(),
                }),
        )
}

fn ids(source: &str) -> Vec<String> {
    let doc = Document::parse(source).unwrap();
    doc.elements()
        .iter()
        .filter_map(|element| element.id().map(str::to_string))
        .collect()
}

#[test]
fn user_definitions_take_precedence() {
    let (types, templates) = (catalog(), templates());
    let merged = Merger::new(&types, &templates).merge_str(USER_MAPPER).unwrap();

    assert_eq!(merged.retained(), ["selectByPrimaryKey"]);

    let doc = Document::parse(merged.as_str()).unwrap();
    let selects: Vec<_> = doc
        .elements()
        .iter()
        .filter(|element| element.id() == Some("selectByPrimaryKey"))
        .collect();
    assert_eq!(selects.len(), 1);
    assert_eq!(selects[0].name(), "select");
    assert_eq!(selects[0].text(), "SELECT 1");
}

#[test]
fn every_missing_operation_is_added_once() {
    let (types, templates) = (catalog(), templates());
    let merged = Merger::new(&types, &templates).merge_str(USER_MAPPER).unwrap();

    let expected: BTreeSet<&str> = Contract::Base
        .operations()
        .iter()
        .chain(Contract::Example.operations())
        .copied()
        .filter(|op| *op != "selectByPrimaryKey")
        .collect();
    let added: BTreeSet<&str> = merged.added_ids().collect();
    assert_eq!(added, expected);

    let all = ids(merged.as_str());
    let unique: BTreeSet<_> = all.iter().collect();
    assert_eq!(all.len(), unique.len(), "duplicate ids in {all:?}");
}

#[test]
fn untouched_content_is_preserved() {
    let (types, templates) = (catalog(), templates());
    let merged = Merger::new(&types, &templates).merge_str(USER_MAPPER).unwrap();

    let close = USER_MAPPER.rfind("</mapper>").unwrap();
    assert!(merged.as_str().starts_with(&USER_MAPPER[..close]));
    assert!(merged.as_str().ends_with("</mapper>\n"));
}

#[test]
fn merge_is_idempotent() {
    let (types, templates) = (catalog(), templates());
    let merger = Merger::new(&types, &templates);

    let first = merger.merge_str(USER_MAPPER).unwrap();
    let second = merger.merge_str(first.as_str()).unwrap();

    assert_eq!(second.added().len(), 0);
    assert_eq!(ids(first.as_str()), ids(second.as_str()));
    assert_eq!(first.as_str(), second.as_str());
}

#[test]
fn primary_key_contract_uses_bound_key_type() {
    let (types, templates) = (catalog(), templates());
    let merged = Merger::new(&types, &templates).merge_str(ORDER_MAPPER).unwrap();

    let added: Vec<_> = merged.added_ids().collect();
    assert_eq!(
        added,
        [
            "deleteByPrimaryKey",
            "selectByPrimaryKey",
            "updateByPrimaryKey",
            "updateByPrimaryKeySelective"
        ]
    );

    for element in merged.added() {
        assert_eq!(element.attr("parameterType"), Some("Long"));
        assert_eq!(element.attr("key"), Some("order_id"));
    }

    assert!(merged.as_str().contains(
        "  <statement id=\"selectByPrimaryKey\" parameterType=\"Long\" key=\"order_id\">\n      /* selectByPrimaryKey */ orders\n  </statement>\n"
    ));
}

#[test]
fn key_type_policy_is_configurable() {
    let types = TypeCatalog::new().with(
        TypeDescriptor::new("com.acme.OrderMapper")
            .table("orders")
            .implements(ContractBinding::Base {
                entity: "com.acme.Order".into(),
                query: "com.acme.OrderQuery".into(),
                key: "Integer".into(),
            })
            .implements(ContractBinding::PrimaryKey {
                entity: "com.acme.Order".into(),
                key: "Long".into(),
            }),
    );
    let templates = templates();

    let merged = Merger::new(&types, &templates).merge_str(ORDER_MAPPER).unwrap();
    assert!(merged
        .added()
        .iter()
        .all(|element| element.attr("parameterType") == Some("Long")));

    let merged = Merger::new(&types, &templates)
        .key_type_policy(KeyTypePolicy::BaseFirst)
        .merge_str(ORDER_MAPPER)
        .unwrap();
    assert!(merged
        .added()
        .iter()
        .all(|element| element.attr("parameterType") == Some("Integer")));
}

#[test]
fn unknown_type_passes_through() {
    let (types, templates) = (TypeCatalog::new(), templates());
    let merged = Merger::new(&types, &templates).merge_str(USER_MAPPER).unwrap();

    assert!(merged.is_pass_through());
    assert_eq!(merged.as_str(), USER_MAPPER);
}

#[test]
fn type_without_table_passes_through() {
    let types = TypeCatalog::new()
        .with(TypeDescriptor::new("com.acme.UserMapper").implements(base()));
    let templates = templates();

    // Without a table no BaseResultMap is needed either.
    let src = "<mapper namespace=\"com.acme.UserMapper\">\n\t<select id=\"x\">SELECT 2</select>\n</mapper>";
    let merged = Merger::new(&types, &templates).merge_str(src).unwrap();

    assert!(merged.is_pass_through());
    assert_eq!(merged.as_str(), src);
}

#[test]
fn no_contracts_leaves_document_unchanged() {
    let types =
        TypeCatalog::new().with(TypeDescriptor::new("com.acme.UserMapper").table("sys_user"));
    let templates = templates();

    let merged = Merger::new(&types, &templates).merge_str(USER_MAPPER).unwrap();
    assert!(!merged.is_pass_through());
    assert!(merged.added().is_empty());
    assert_eq!(merged.as_str(), USER_MAPPER);
}

#[test]
fn registration_order_does_not_change_output() {
    let types = catalog();

    let forward = templates();
    let mut reversed = Templates::new();
    let mut names: Vec<&str> = forward.operations().collect();
    names.reverse();
    for name in names {
        let name = name.to_string();
        let inner = templates();
        reversed.register(name.clone(), move |cx: &TableContext| inner.render(&name, cx));
    }

    let a = Merger::new(&types, &forward).merge_str(USER_MAPPER).unwrap();
    let b = Merger::new(&types, &reversed).merge_str(USER_MAPPER).unwrap();
    assert_eq!(a.as_str(), b.as_str());
}

#[test]
fn missing_base_result_map_writes_nothing() {
    let (types, templates) = (catalog(), templates());
    let src = "<mapper namespace=\"com.acme.UserMapper\"></mapper>";

    let mut output = vec![];
    let err = Merger::new(&types, &templates)
        .merge(src.as_bytes(), &mut output)
        .unwrap_err();

    assert!(err.is_missing_base_result_map());
    assert!(output.is_empty());
}

#[test]
fn missing_template_is_fatal() {
    let types = catalog();
    let mut templates = Templates::new();
    for op in Contract::PrimaryKey.operations() {
        templates.register(*op, |_: &TableContext| Ok(String::new()));
    }

    let err = Merger::new(&types, &templates)
        .merge_str(USER_MAPPER)
        .unwrap_err();
    assert!(err.is_unknown_operation());
}

#[test]
fn malformed_fragment_is_fatal() {
    let types = catalog();
    let mut templates = templates();
    templates.register("deleteByPrimaryKey", |_: &TableContext| {
        Ok("<delete id=\"deleteByPrimaryKey\">DELETE".to_string())
    });

    let err = Merger::new(&types, &templates)
        .merge_str(ORDER_MAPPER)
        .unwrap_err();
    assert!(err.is_fragment_parse());
}

#[test]
fn template_errors_carry_operation_context() {
    let types = catalog();
    let templates = templates();
    let src = r#"<mapper namespace="com.acme.OrderMapper">
  <resultMap id="BaseResultMap" type="com.acme.Order">
    <result column="total" property="total"/>
  </resultMap>
</mapper>"#;

    let err = Merger::new(&types, &templates).merge_str(src).unwrap_err();
    assert!(err.is_invalid_result_map());
    assert_eq!(
        err.to_string(),
        "rendering `deleteByPrimaryKey`: invalid `BaseResultMap`: mapper `com.acme.OrderMapper` declares no <id> mapping"
    );
}

#[test]
fn merge_streams() {
    let (types, templates) = (catalog(), templates());

    let mut output = vec![];
    let merged = Merger::new(&types, &templates)
        .merge(ORDER_MAPPER.as_bytes(), &mut output)
        .unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), merged.as_str());
    assert_eq!(merged.namespace(), "com.acme.OrderMapper");
}

#[test]
fn malformed_input_and_missing_namespace() {
    let (types, templates) = (catalog(), templates());
    let merger = Merger::new(&types, &templates);

    assert!(merger
        .merge_str("<mapper namespace=\"a\"><select id=\"x\"></mapper>")
        .unwrap_err()
        .is_malformed_document());
    assert!(merger
        .merge_str("<mapper><select id=\"x\"/></mapper>")
        .unwrap_err()
        .is_missing_namespace());
}

#[test]
fn merger_is_shared_across_threads() {
    let (types, templates) = (catalog(), templates());
    let merger = Merger::new(&types, &templates);
    let expected = merger.merge_str(ORDER_MAPPER).unwrap().into_string();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| merger.merge_str(ORDER_MAPPER).unwrap().into_string()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn template_prolog_is_not_spliced() {
    let types = catalog();
    let mut templates = Templates::new();
    for op in Contract::PrimaryKey.operations() {
        let op = *op;
        templates.register(op, move |_: &TableContext| {
            Ok(format!(
                "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!-- {op} -->\n<select id=\"{op}\">SELECT 1</select>"
            ))
        });
    }

    let merged = Merger::new(&types, &templates)
        .merge_str(ORDER_MAPPER)
        .unwrap();

    assert!(!merged.as_str().contains("<?xml"), "{}", merged.as_str());
    assert!(!merged.as_str().contains("<!--"), "{}", merged.as_str());
    assert!(merged
        .as_str()
        .contains("  <select id=\"deleteByPrimaryKey\">SELECT 1</select>\n"));
    assert_eq!(
        ids(merged.as_str()),
        [
            "BaseResultMap",
            "deleteByPrimaryKey",
            "selectByPrimaryKey",
            "updateByPrimaryKey",
            "updateByPrimaryKeySelective"
        ]
    );
}
