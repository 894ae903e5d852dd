//! Shared helpers for the integration tests.

/// Declare a test that parses `input` and checks the canonical printed form.
///
/// ```ignore
/// texp_case!(
///     union_sorted,
///     input: "(union string number)",
///     printed: "(union number string)",
/// );
/// ```
///
/// With `error:` instead of `printed:` the parse must fail with a matching
/// [`texpr::ParseError`] variant.
macro_rules! texp_case {
    ($name:ident, input: $input:expr, printed: $printed:expr $(,)?) => {
        #[test]
        fn $name() {
            let arena = texpr::Bump::new();
            let manager = texpr::TypeManager::new(&arena);
            let ty = match texpr::parse_te(manager, $input) {
                Ok(ty) => ty,
                Err(err) => panic!("Failed to parse {:?}: {}", $input, err),
            };
            pretty_assertions::assert_eq!(texpr::unparse(ty).unwrap(), $printed);

            // The printed form reads back to the same interned type.
            let reparsed = texpr::parse_te(manager, $printed).unwrap();
            assert!(
                core::ptr::eq(ty, reparsed),
                "{:?} did not read back to itself",
                $printed
            );
        }
    };
    ($name:ident, input: $input:expr, error: $pattern:pat $(,)?) => {
        #[test]
        fn $name() {
            let arena = texpr::Bump::new();
            let manager = texpr::TypeManager::new(&arena);
            match texpr::parse_te(manager, $input) {
                Err($pattern) => {}
                Err(other) => panic!("Unexpected error for {:?}: {:?}", $input, other),
                Ok(ty) => panic!("Expected {:?} to fail, parsed {}", $input, ty),
            }
        }
    };
}
