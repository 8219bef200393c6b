#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        init_arguments in constructor is OK
        "3"
        "4"
    }

    tests! {
        early_bare_return in constructor is OK
        "1"
    }

    tests! {
        reinvoking_init_yields_the_instance in constructor is OK
        "C instance"
    }

    tests! {
        class_arity_from_init in constructor is ERR 70
        "[line 4] Runtime error: Expected 2 arguments but got 1."
    }

    tests! {
        return_value_from_init in constructor is ERR 65
        "[line 3] Error at 'return': Can't return a value from an initializer."
    }
}
