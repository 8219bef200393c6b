#[macro_use]
mod common;

#[cfg(test)]
mod inheritance {
    tests! {
        inherit_methods in inheritance is OK
        "base"
    }

    tests! {
        override_method in inheritance is OK
        "derived"
        "base"
    }

    tests! {
        inherited_chain in inheritance is OK
        "a"
    }

    tests! {
        inherited_init in inheritance is OK
        "7"
    }

    tests! {
        superclass_must_be_class in inheritance is ERR 70
        "[line 2] Runtime error: Superclass must be a class."
    }

    tests! {
        inherit_from_self in inheritance is ERR 65
        "[line 1] Error at 'Ouroboros': A class can't inherit from itself."
    }
}
