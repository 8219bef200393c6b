#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        define_and_read in variable is OK
        "1"
        "nil"
    }

    tests! {
        shadowing in variable is OK
        "inner"
        "outer"
    }

    tests! {
        redeclare_same_scope in variable is OK
        "2"
        "2"
    }

    tests! {
        assignment_returns_value in variable is OK
        "2"
        "2"
    }

    tests! {
        use_in_own_initializer in variable is ERR 65
        "[line 2] Error at 'a': Can't read local variable in its own initializer."
    }

    tests! {
        undefined_read in variable is ERR 70
        "[line 1] Runtime error: Undefined variable 'ghost'."
    }

    tests! {
        undefined_assign in variable is ERR 70
        "[line 1] Runtime error: Undefined variable 'ghost'."
    }
}
