//! Built-in demonstration inputs.

/// A named edge list used by `bstcheck demo`.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinCase {
    pub name: &'static str,
    pub tokens: &'static [&'static str],
}

const CASES: &[BuiltinCase] = &[
    BuiltinCase {
        name: "balanced",
        tokens: &["(2,1)", "(4,2)", "(4,7)"],
    },
    BuiltinCase {
        name: "nested right subtree",
        tokens: &["(2,1)", "(4,2)", "(7,5)", "(4,7)", "(7,9)"],
    },
    BuiltinCase {
        name: "duplicate right child",
        tokens: &["(2,1)", "(2,3)", "(12,2)", "(2,5)"],
    },
    BuiltinCase {
        name: "deep left chain",
        tokens: &["(4,2)", "(5,4)", "(9,5)", "(11,10)", "(9,11)", "(5,8)"],
    },
];

pub fn builtin_cases() -> &'static [BuiltinCase] {
    CASES
}
