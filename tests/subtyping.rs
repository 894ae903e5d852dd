//! Subtyping and ordering over parsed types.

use std::cmp::Ordering;

use pretty_assertions::assert_eq;
use texpr::{Bump, Type, TypeManager, compare, is_subtype, parse_te};

fn parse<'a>(manager: &TypeManager<'a>, source: &str) -> &'a Type<'a> {
    parse_te(manager, source).unwrap_or_else(|err| panic!("Failed to parse {:?}: {}", source, err))
}

#[test]
fn test_subtyping_table() {
    let arena = Bump::new();
    let manager = TypeManager::new(&arena);

    let table = [
        ("number", "number", true),
        ("number", "string", false),
        ("number", "any", false),
        ("number", "(union number string)", true),
        ("(union number string)", "number", false),
        ("(union number string)", "(union boolean number string)", true),
        ("(union boolean number string)", "(union number string)", false),
        ("(number & string)", "number", true),
        ("number", "(number & string)", false),
        ("(boolean & number & string)", "(number & string)", true),
        ("(number & string)", "(boolean & number & string)", false),
        ("(number -> number)", "(number -> number)", true),
        ("((union number string) -> number)", "(number -> number)", true),
        ("(number -> number)", "((union number string) -> number)", false),
        ("(number -> number)", "(number -> (union number string))", true),
        ("(number -> (union number string))", "(number -> number)", false),
        ("(number -> number)", "(number * number -> number)", false),
        ("(T -> T)", "(T -> T)", true),
        ("(T -> T)", "(U -> U)", false),
        ("(any -> is? number)", "(any -> boolean)", true),
    ];

    for (a, b, expected) in table {
        assert_eq!(
            is_subtype(parse(manager, a), parse(manager, b)),
            expected,
            "{} <: {}",
            a,
            b
        );
    }
}

#[test]
fn test_reflexivity() {
    let arena = Bump::new();
    let manager = TypeManager::new(&arena);

    let mut samples = [
        "void",
        "never",
        "T",
        "(union number (T -> T))",
        "(inter (union number string) (union boolean void))",
        "((union number string) * any -> is? number)",
        "((number & string) -> (Empty -> T))",
    ]
    .map(|source| parse(manager, source))
    .to_vec();
    samples.push(manager.tuple(&[manager.number(), manager.type_var("T")]));
    samples.push(manager.difference(&[manager.any(), manager.number()]));
    samples.push(manager.difference(&[manager.str(), manager.number()]));

    for ty in samples {
        assert!(is_subtype(ty, ty), "{} is not a subtype of itself", ty);
        assert_eq!(compare(ty, ty), Ordering::Equal, "{}", ty);
    }
}

#[test]
fn test_compare_orders_subtypes_first() {
    let arena = Bump::new();
    let manager = TypeManager::new(&arena);

    let narrow = parse(manager, "number");
    let wide = parse(manager, "(union number string)");
    assert_eq!(compare(narrow, wide), Ordering::Less);
    assert_eq!(compare(wide, narrow), Ordering::Greater);

    // Unrelated types fall back to their printed forms.
    assert_eq!(
        compare(parse(manager, "boolean"), parse(manager, "void")),
        Ordering::Less
    );
    assert_eq!(
        compare(parse(manager, "(number -> void)"), parse(manager, "number")),
        Ordering::Less
    );
}

#[test]
fn test_normalized_members_respect_compare() {
    let arena = Bump::new();
    let manager = TypeManager::new(&arena);

    let ty = parse(
        manager,
        "(union void (T -> T) boolean (number & string) number)",
    );
    let members = ty.components();
    assert!(members.len() >= 2);
    for pair in members.windows(2) {
        assert_ne!(
            compare(pair[0], pair[1]),
            Ordering::Greater,
            "{} sorted after {}",
            pair[0],
            pair[1]
        );
    }
}
