#[macro_use]
mod common;

#[cfg(test)]
mod method {
    tests! {
        this_in_method in method is OK
        "hi ada"
    }

    tests! {
        bound_method_keeps_this in method is OK
        "grace"
    }

    tests! {
        method_arity in method is ERR 70
        "[line 4] Runtime error: Expected 1 arguments but got 0."
    }
}
