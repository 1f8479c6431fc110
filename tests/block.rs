#[macro_use]
mod common;

#[cfg(test)]
mod block {
    tests! {
        empty is OK "{ } print \"ok\";" =>
        "ok"
    }

    tests! {
        scope is OK "var a = \"outer\"; { var a = \"inner\"; print a; } print a;" =>
        "inner"
        "outer"
    }

    tests! {
        nested is OK "var a = 1; { var a = 2; { var a = 3; print a; } print a; } print a;" =>
        "3"
        "2"
        "1"
    }

    tests! {
        assignment_reaches_enclosing_scope is OK "var a = 1; { a = 2; } print a;" =>
        "2"
    }
}
