//! Properties of the permissive message formatter

use kueue_testkit::events::{sprintf, Arg};
use proptest::prelude::*;

proptest! {
    #[test]
    fn templates_without_verbs_render_verbatim(text in "[^%]{0,64}") {
        prop_assert_eq!(sprintf(&text, &[]), text);
    }

    #[test]
    fn string_verb_substitutes_argument(prefix in "[a-z ]{0,16}", value in "[^%]{0,32}") {
        let template = format!("{prefix}%s");
        prop_assert_eq!(sprintf(&template, &[Arg::from(value.as_str())]), format!("{prefix}{value}"));
    }

    #[test]
    fn integers_render_in_decimal(value in any::<i64>()) {
        prop_assert_eq!(sprintf("%d", &[Arg::Int(value)]), value.to_string());
        prop_assert_eq!(sprintf("%v", &[Arg::Int(value)]), value.to_string());
    }

    #[test]
    fn fixed_precision_matches_std(value in -1.0e9f64..1.0e9, precision in 0usize..10) {
        let template = format!("%.{precision}f");
        prop_assert_eq!(sprintf(&template, &[Arg::Float(value)]), format!("{value:.precision$}"));
    }

    #[test]
    fn arbitrary_templates_never_panic(template in ".{0,48}", ints in proptest::collection::vec(any::<i64>(), 0..4)) {
        let args: Vec<Arg> = ints.into_iter().map(Arg::Int).collect();
        let _ = sprintf(&template, &args);
    }

    #[test]
    fn extra_arguments_are_reported(extra in 1usize..5) {
        let args: Vec<Arg> = (0..extra).map(|n| Arg::Uint(n as u64)).collect();
        let rendered = sprintf("done", &args);
        prop_assert!(rendered.starts_with("done%!(EXTRA uint=0"));
        prop_assert_eq!(rendered.matches("uint=").count(), extra);
    }
}
