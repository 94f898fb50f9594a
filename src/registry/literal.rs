//! Static evaluation of `meta` initializers.
//!
//! A `metaValue` is JavaScript source text, not JSON. It is parsed with oxc
//! and folded into a [`serde_json::Value`] when it is built only from
//! literals. Anything that needs runtime evaluation yields `None`.

use oxc::allocator::Allocator;
use oxc::ast::ast::{
    ArrayExpressionElement, Expression, ObjectPropertyKind, PropertyKey, PropertyKind, Statement,
    UnaryOperator,
};
use oxc::parser::Parser;
use oxc::span::SourceType;
use serde_json::{Map, Number, Value};

/// Evaluate `text` as a literal expression.
pub fn literal_to_json(text: &str) -> Option<Value> {
    let allocator = Allocator::default();
    let source = format!("({text});");
    let ret = Parser::new(&allocator, &source, SourceType::tsx()).parse();
    if !ret.errors.is_empty() || ret.program.body.len() != 1 {
        return None;
    }
    match &ret.program.body[0] {
        Statement::ExpressionStatement(stmt) => fold(&stmt.expression),
        _ => None,
    }
}

fn fold(expr: &Expression) -> Option<Value> {
    match expr {
        Expression::ParenthesizedExpression(e) => fold(&e.expression),
        Expression::TSAsExpression(e) => fold(&e.expression),
        Expression::TSSatisfiesExpression(e) => fold(&e.expression),
        Expression::TSNonNullExpression(e) => fold(&e.expression),

        Expression::NullLiteral(_) => Some(Value::Null),
        Expression::BooleanLiteral(b) => Some(Value::Bool(b.value)),
        Expression::StringLiteral(s) => Some(Value::String(s.value.to_string())),
        Expression::NumericLiteral(n) => number(n.value),
        Expression::TemplateLiteral(t) if t.expressions.is_empty() => {
            let text: Option<String> = t
                .quasis
                .iter()
                .map(|q| q.value.cooked.as_ref().map(|c| c.to_string()))
                .collect();
            text.map(Value::String)
        }
        Expression::UnaryExpression(u) => match u.operator {
            UnaryOperator::UnaryNegation => match fold(&u.argument)? {
                Value::Number(n) => number(-n.as_f64()?),
                _ => None,
            },
            UnaryOperator::UnaryPlus => match fold(&u.argument)? {
                Value::Number(n) => Some(Value::Number(n)),
                _ => None,
            },
            _ => None,
        },

        Expression::ArrayExpression(array) => array
            .elements
            .iter()
            .map(|element| match element {
                ArrayExpressionElement::Elision(_) => Some(Value::Null),
                ArrayExpressionElement::SpreadElement(_) => None,
                other => fold(other.as_expression()?),
            })
            .collect::<Option<Vec<_>>>()
            .map(Value::Array),

        Expression::ObjectExpression(object) => {
            let mut map = Map::new();
            for property in &object.properties {
                let ObjectPropertyKind::ObjectProperty(prop) = property else {
                    return None;
                };
                if prop.kind != PropertyKind::Init || prop.method || prop.shorthand {
                    return None;
                }
                map.insert(key_name(&prop.key, prop.computed)?, fold(&prop.value)?);
            }
            Some(Value::Object(map))
        }

        _ => None,
    }
}

fn key_name(key: &PropertyKey, computed: bool) -> Option<String> {
    match key {
        PropertyKey::StaticIdentifier(id) if !computed => Some(id.name.to_string()),
        PropertyKey::StringLiteral(s) => Some(s.value.to_string()),
        PropertyKey::NumericLiteral(n) => Some(match number(n.value)? {
            Value::Number(n) => n.to_string(),
            _ => return None,
        }),
        _ => None,
    }
}

/// Integral values stay integers (`1`, not `1.0`).
fn number(value: f64) -> Option<Value> {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        return Some(Value::Number(Number::from(value as i64)));
    }
    Number::from_f64(value).map(Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_literal() {
        assert_eq!(
            literal_to_json("{title: 'Home', order: 2, 'menu-icon': \"la la-home\"}"),
            Some(json!({"title": "Home", "order": 2, "menu-icon": "la la-home"}))
        );
    }

    #[test]
    fn test_nested_values() {
        assert_eq!(
            literal_to_json("{ tags: ['a', `b`, null], flags: { hidden: false }, w: -1.5 }"),
            Some(json!({"tags": ["a", "b", null], "flags": {"hidden": false}, "w": -1.5}))
        );
    }

    #[test]
    fn test_type_wrappers_are_unwrapped() {
        assert_eq!(
            literal_to_json("({ title: 'Typed' }) as const"),
            Some(json!({"title": "Typed"}))
        );
        assert_eq!(
            literal_to_json("{ title: 'S' } satisfies ViewMeta"),
            Some(json!({"title": "S"}))
        );
    }

    #[test]
    fn test_keeps_key_order() {
        let value = literal_to_json("{z: 1, a: 2}").unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"z":1,"a":2}"#);
    }

    #[test]
    fn test_scalars() {
        assert_eq!(literal_to_json("'x'"), Some(json!("x")));
        assert_eq!(literal_to_json("42"), Some(json!(42)));
        assert_eq!(literal_to_json("true"), Some(json!(true)));
    }

    #[test]
    fn test_dynamic_values_rejected() {
        assert_eq!(literal_to_json("{title: t('home')}"), None);
        assert_eq!(literal_to_json("{title}"), None);
        assert_eq!(literal_to_json("{...base}"), None);
        assert_eq!(literal_to_json("{[key]: 1}"), None);
        assert_eq!(literal_to_json("`a${b}`"), None);
        assert_eq!(literal_to_json("{ get x() { return 1; } }"), None);
    }

    #[test]
    fn test_invalid_source() {
        assert_eq!(literal_to_json("{title: "), None);
        assert_eq!(literal_to_json("1); foo("), None);
    }
}
