#[macro_use]
mod common;

#[cfg(test)]
mod this {
    tests! {
        this_resolves_to_receiver in this is OK
        "Egotist instance"
    }

    tests! {
        this_in_nested_function in this is OK
        "outer"
    }

    tests! {
        this_at_top_level in this is ERR 65
        "[line 1] Error at 'this': Can't use 'this' outside of a class."
    }

    tests! {
        this_in_function in this is ERR 65
        "[line 2] Error at 'this': Can't use 'this' outside of a class."
    }
}
