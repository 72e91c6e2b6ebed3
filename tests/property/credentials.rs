// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Credential Policy

use proptest::prelude::*;
use rds_topology::domain::invariants::{validate_password, validate_username};
use rds_topology::domain::EngineKind;

proptest! {
    #[test]
    fn prop_well_formed_mysql_usernames_pass(username in "[a-z][a-z0-9_]{4,15}") {
        prop_assume!(!EngineKind::Mysql.reserved_usernames().contains(&username.as_str()));
        prop_assert!(validate_username(&EngineKind::Mysql, &username).is_ok());
    }

    #[test]
    fn prop_long_mysql_usernames_fail(username in "[a-z][a-z0-9_]{16,40}") {
        prop_assert!(validate_username(&EngineKind::Mysql, &username).is_err());
    }

    #[test]
    fn prop_forbidden_password_characters_fail(
        prefix in "[A-Za-z0-9]{0,20}",
        forbidden in prop::sample::select(vec!['/', '"', '@', ' ']),
        suffix in "[A-Za-z0-9]{0,20}",
    ) {
        let password = format!("{prefix}{forbidden}{suffix}");
        prop_assert!(validate_password(&password).is_err());
    }

    #[test]
    fn prop_printable_passwords_pass(password in "[A-Za-z0-9!#$%^&*()_+=-]{1,128}") {
        prop_assert!(validate_password(&password).is_ok());
    }
}
