#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        set_and_get in field is OK
        "1"
        "2"
    }

    tests! {
        fields_are_per_instance in field is OK
        "a"
        "b"
    }

    tests! {
        field_shadows_method in field is OK
        "method"
        "field"
    }

    tests! {
        undefined_property in field is ERR 70
        "[line 2] Runtime error: Undefined property 'missing'."
    }

    tests! {
        get_on_non_instance in field is ERR 70
        "[line 2] Runtime error: Only instances have properties."
    }

    tests! {
        set_on_non_instance in field is ERR 70
        "[line 2] Runtime error: Only instances have fields."
    }
}
