#[macro_use]
mod common;

#[cfg(test)]
mod comma {
    tests! {
        evaluates_to_rightmost is OK "print (1, 2, 3);" =>
        "3"
    }

    tests! {
        is_left_associative is OK "print (1 + 1, 2 + 2);" =>
        "4"
    }

    tests! {
        side_effects_run_in_order is OK "var a = 1; print (a = a + 1, a = a + 1, a);" =>
        "3"
    }

    tests! {
        works_at_statement_level_without_parens is OK "print 1, 2;" =>
        "2"
    }
}
