use numerus::placeholder::{extract_placeholders, substitute};
use numerus::plural_rules::{category_count, form_index};
use numerus::{Catalog, Locale, MessageEntry, Resolver};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn locale(tag: &str) -> Locale {
    Locale::parse(tag).unwrap()
}

fn id_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_-]{0,15}").expect("valid id regex")
}

fn text_strategy() -> impl Strategy<Value = String> {
    // no '%' so the text survives substitution untouched
    proptest::string::string_regex("[A-Za-z0-9 _\\-\\.,!\\?ąęłżźćńóśЖжÅåÄä]{1,30}")
        .expect("valid text regex")
}

fn tag_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["en", "sv", "pl", "ru", "cs", "fr", "ja", "ar", "tlh"])
}

proptest! {
    #[test]
    fn form_index_is_within_arity(tag in tag_strategy(), n in 0i64..1_000_000) {
        let locale = locale(tag);
        let index = form_index(&locale, n).unwrap();
        prop_assert!(index < category_count(&locale));
    }

    #[test]
    fn negative_quantities_are_rejected(tag in tag_strategy(), n in i64::MIN..0) {
        prop_assert!(form_index(&locale(tag), n).is_err());
    }

    #[test]
    fn singular_entries_ignore_quantity(
        messages in prop::collection::btree_map(id_strategy(), text_strategy(), 1..10),
        quantity in proptest::option::of(0i64..10_000),
    ) {
        let entries = messages
            .iter()
            .map(|(id, text)| MessageEntry::singular(id.clone(), id.clone(), text.clone()));
        let catalog = Catalog::from_entries(locale("pl"), entries).unwrap();
        let resolver = Resolver::new(vec![catalog], locale("pl"));
        for (id, text) in &messages {
            prop_assert_eq!(&resolver.resolve::<&str>(id, &locale("pl"), quantity, &[]), text);
        }
    }

    #[test]
    fn resolution_is_never_empty(
        messages in prop::collection::btree_map(id_strategy(), text_strategy(), 0..6),
        probe in id_strategy(),
        tag in tag_strategy(),
    ) {
        let entries = messages
            .iter()
            .map(|(id, text)| MessageEntry::singular(id.clone(), text.clone(), "").unfinished());
        let catalog = Catalog::from_entries(locale("en"), entries).unwrap();
        let resolver = Resolver::new(vec![catalog], locale("en"));
        let resolved = resolver.translate(&probe, &locale(tag));
        prop_assert!(!resolved.is_empty());
        let expected = messages.get(&probe).cloned().unwrap_or_else(|| probe.clone());
        prop_assert_eq!(resolved, expected);
    }

    #[test]
    fn unique_ids_survive_loading(
        messages in prop::collection::btree_map(id_strategy(), text_strategy(), 1..20),
    ) {
        let entries = messages
            .iter()
            .map(|(id, text)| MessageEntry::singular(id.clone(), id.clone(), text.clone()));
        let catalog = Catalog::from_entries(locale("sv"), entries).unwrap();
        let ids: Vec<&str> = messages.keys().map(String::as_str).collect();
        prop_assert_eq!(catalog.ids(), ids);
    }

    #[test]
    fn zero_based_markers_take_matching_args(
        args in prop::collection::vec(text_strategy(), 1..6),
    ) {
        let template = (0..args.len())
            .map(|i| format!("[%{i}]"))
            .collect::<Vec<_>>()
            .join(" ");
        let expected = args
            .iter()
            .map(|arg| format!("[{arg}]"))
            .collect::<Vec<_>>()
            .join(" ");
        prop_assert_eq!(substitute(&template, &args), expected);
    }

    #[test]
    fn text_without_markers_is_unchanged(
        text in text_strategy(),
        args in prop::collection::vec(text_strategy(), 0..3),
    ) {
        prop_assert_eq!(substitute(&text, &args), text.clone());
        prop_assert!(extract_placeholders(&text).is_empty());
    }

    #[test]
    fn missing_args_leave_markers(count in 1usize..5) {
        let template: String = (0..count).map(|i| format!("%{i} ")).collect();
        prop_assert_eq!(substitute::<&str>(&template, &[]), template.clone());
    }
}

#[test]
fn plural_forms_follow_category_order() {
    let mut expected = BTreeMap::new();
    expected.insert(1, "1 znak");
    expected.insert(3, "3 znaki");
    expected.insert(12, "12 znaków");
    expected.insert(104, "104 znaki");
    expected.insert(112, "112 znaków");

    let pl = locale("pl");
    let catalog = Catalog::from_entries(
        pl.clone(),
        vec![MessageEntry::plural("chars", "%0 character(s)", ["%0 znak", "%0 znaki", "%0 znaków"])],
    )
    .unwrap();
    let resolver = Resolver::new(vec![catalog], pl.clone());
    for (n, text) in expected {
        assert_eq!(resolver.resolve("chars", &pl, Some(n), &[n.to_string()]), text);
    }
}
