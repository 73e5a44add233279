//! Plural rule table and category selection.
//!
//! Every supported language maps to one [`PluralRule`] family. The family fixes
//! both the classification of a count and the order of the translation forms
//! in a catalog: the form at index `i` belongs to `rule.categories()[i]`.
//! Languages missing from the table use [`PluralRule::OnlyOther`].

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::{error::Error, locale::Locale, types::PluralCategory};

lazy_static! {
    /// Static mapping from base language subtag to its plural rule family (CLDR cardinals).
    static ref RULE_TABLE: BTreeMap<&'static str, PluralRule> = {
        use PluralRule::*;
        let mut m = BTreeMap::new();

        // One/Other: `one` only for exactly 1
        for code in [
            "en","de","nl","sv","da","nb","nn","no","is","fi","et","fa","hi","bn","gu",
            "ta","te","kn","ml","mr","it","es","pt","mk","el","eu","gl","af","sw","ur",
            "fil","tl","tr","hu","bg","ca","he","iw","sq","az","ka","kk","ky","mn","uz"
        ] {
            m.insert(code, OneOther);
        }

        // 0 and 1 are singular
        for code in ["fr","hy","kab","ff"] {
            m.insert(code, French);
        }

        // No plural distinction
        for code in ["ja","zh","ko","th","vi","km","lo","my","yue","id","ms"] {
            m.insert(code, OnlyOther);
        }

        for code in ["ru","uk","be","sr","hr","bs","sh"] {
            m.insert(code, EastSlavic);
        }

        m.insert("pl", Polish);

        for code in ["cs","sk"] {
            m.insert(code, WestSlavic);
        }

        m.insert("ar", Arabic);

        m
    };
}

/// A plural grammar family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PluralRule {
    /// Every count is `other`.
    OnlyOther,
    /// `one` for 1, `other` otherwise.
    OneOther,
    /// `one` for 0 and 1, `other` otherwise.
    French,
    /// Russian group: `one` for 1, 21, 31..., `few` for 2-4, 22-24..., `many` for the rest.
    EastSlavic,
    /// Like [`PluralRule::EastSlavic`] except that only 1 itself is `one`.
    Polish,
    /// Czech/Slovak: `one` for 1, `few` for 2-4, `other` for the rest.
    WestSlavic,
    /// All six categories.
    Arabic,
}

impl PluralRule {
    /// Selects the rule for a locale by its primary language subtag.
    pub fn for_locale(locale: &Locale) -> Self {
        RULE_TABLE
            .get(locale.language())
            .copied()
            .unwrap_or(PluralRule::OnlyOther)
    }

    /// Categories in catalog form order.
    pub fn categories(self) -> &'static [PluralCategory] {
        use PluralCategory::*;
        match self {
            PluralRule::OnlyOther => &[Other],
            PluralRule::OneOther | PluralRule::French => &[One, Other],
            PluralRule::EastSlavic | PluralRule::Polish => &[One, Few, Many],
            PluralRule::WestSlavic => &[One, Few, Other],
            PluralRule::Arabic => &[Zero, One, Two, Few, Many, Other],
        }
    }

    /// Number of forms a plural message must carry under this rule.
    pub fn category_count(self) -> usize {
        self.categories().len()
    }

    /// Classifies a non-negative count.
    pub fn categorize(self, n: u64) -> PluralCategory {
        let mod10 = n % 10;
        let mod100 = n % 100;
        match self {
            PluralRule::OnlyOther => PluralCategory::Other,
            PluralRule::OneOther => {
                if n == 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            PluralRule::French => {
                if n <= 1 {
                    PluralCategory::One
                } else {
                    PluralCategory::Other
                }
            }
            PluralRule::EastSlavic => {
                if mod10 == 1 && mod100 != 11 {
                    PluralCategory::One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            PluralRule::Polish => {
                if n == 1 {
                    PluralCategory::One
                } else if (2..=4).contains(&mod10) && !(12..=14).contains(&mod100) {
                    PluralCategory::Few
                } else {
                    PluralCategory::Many
                }
            }
            PluralRule::WestSlavic => match n {
                1 => PluralCategory::One,
                2..=4 => PluralCategory::Few,
                _ => PluralCategory::Other,
            },
            PluralRule::Arabic => match n {
                0 => PluralCategory::Zero,
                1 => PluralCategory::One,
                2 => PluralCategory::Two,
                _ if (3..=10).contains(&mod100) => PluralCategory::Few,
                _ if (11..=99).contains(&mod100) => PluralCategory::Many,
                _ => PluralCategory::Other,
            },
        }
    }

    /// Position of `category` in the form order, if the rule uses it.
    pub fn index_of(self, category: PluralCategory) -> Option<usize> {
        self.categories().iter().position(|c| *c == category)
    }
}

/// Returns the plural category of `quantity` in `locale`.
///
/// Unknown locales classify everything as `other`. Negative quantities are
/// rejected with [`Error::InvalidQuantity`].
pub fn category_for(locale: &Locale, quantity: i64) -> Result<PluralCategory, Error> {
    let n = u64::try_from(quantity).map_err(|_| Error::InvalidQuantity(quantity))?;
    Ok(PluralRule::for_locale(locale).categorize(n))
}

/// The rule family used for `locale`.
pub fn rule_for(locale: &Locale) -> PluralRule {
    PluralRule::for_locale(locale)
}

/// Categories of `locale` in catalog form order.
pub fn categories_for(locale: &Locale) -> &'static [PluralCategory] {
    PluralRule::for_locale(locale).categories()
}

/// Number of forms a plural message in `locale` must have.
pub fn category_count(locale: &Locale) -> usize {
    PluralRule::for_locale(locale).category_count()
}

/// Form index of `category` in `locale`, or `None` if the locale never uses it.
pub fn index_for(locale: &Locale, category: PluralCategory) -> Option<usize> {
    PluralRule::for_locale(locale).index_of(category)
}

/// Index into a plural message's forms for `quantity` in `locale`.
pub fn form_index(locale: &Locale, quantity: i64) -> Result<usize, Error> {
    let rule = PluralRule::for_locale(locale);
    let n = u64::try_from(quantity).map_err(|_| Error::InvalidQuantity(quantity))?;
    // categorize() only yields categories listed by the same rule
    Ok(rule.index_of(rule.categorize(n)).unwrap_or(0))
}
