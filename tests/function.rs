#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        fib in function is OK
        "55"
    }

    tests! {
        print_function in function is OK
        "<fn greet>"
        "<native fn>"
    }

    tests! {
        parameters in function is OK
        "6"
    }

    tests! {
        nil_return in function is OK
        "nil"
        "nil"
    }

    tests! {
        clock_is_a_number in function is OK
        "true"
    }

    tests! {
        arity_mismatch in function is ERR 70
        "[line 4] Runtime error: Expected 2 arguments but got 1."
    }

    tests! {
        call_non_callable in function is ERR 70
        "[line 2] Runtime error: Can only call functions and classes."
    }
}
