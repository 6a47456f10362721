//! Display names for created channels

use crate::models::{BulkCreateOptions, PrefixOrder};
use crate::normalization::rules::NameRule;
use crate::normalization::NameNormalizer;

/// Builds channel display names from canonical keys.
///
/// Without `add_channel_number` the key is the name. With it the number is
/// written in front, and when the key carries a kept country prefix the
/// country is placed according to `prefix_order`:
///
/// - `number-first`: `101 | UK | Sky One`
/// - `country-first`: `UK | 101 | Sky One`
///
/// The number is followed by `number_separator`; the country by the
/// normalization `country_separator`.
pub struct ChannelNamer<'a> {
    normalizer: &'a NameNormalizer,
    options: &'a BulkCreateOptions,
}

impl<'a> ChannelNamer<'a> {
    pub fn new(normalizer: &'a NameNormalizer, options: &'a BulkCreateOptions) -> Self {
        Self {
            normalizer,
            options,
        }
    }

    pub fn display_name(&self, canonical_key: &str, channel_number: u32) -> String {
        let naming = &self.options.naming;
        if !naming.add_channel_number {
            return canonical_key.to_string();
        }

        let country = if self.options.normalization.keep_country_prefix {
            self.normalizer.country_rule().split(canonical_key)
        } else {
            None
        };

        let num_sep = naming.number_separator;
        let country_sep = self.options.normalization.country_separator;
        let composed = match (country, naming.prefix_order) {
            (Some((code, base)), PrefixOrder::NumberFirst) => {
                format!("{channel_number} {num_sep} {code} {country_sep} {base}")
            }
            (Some((code, base)), PrefixOrder::CountryFirst) => {
                format!("{code} {country_sep} {channel_number} {num_sep} {base}")
            }
            (None, _) => format!("{channel_number} {num_sep} {canonical_key}"),
        };
        self.normalizer.spacing_rule().apply(&composed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChannelNamingOptions, CountrySeparator, NormalizationOptions};
    use rstest::rstest;

    fn options(add_number: bool, keep_country: bool, order: PrefixOrder) -> BulkCreateOptions {
        BulkCreateOptions {
            normalization: NormalizationOptions {
                keep_country_prefix: keep_country,
                country_separator: CountrySeparator::Pipe,
                ..Default::default()
            },
            naming: ChannelNamingOptions {
                add_channel_number: add_number,
                prefix_order: order,
                number_separator: CountrySeparator::Dash,
            },
        }
    }

    #[rstest]
    #[case(false, true, PrefixOrder::NumberFirst, "UK | Sky One")]
    #[case(true, true, PrefixOrder::NumberFirst, "101 - UK | Sky One")]
    #[case(true, true, PrefixOrder::CountryFirst, "UK | 101 - Sky One")]
    #[case(true, false, PrefixOrder::CountryFirst, "101 - UK | Sky One")]
    fn test_display_name(
        #[case] add_number: bool,
        #[case] keep_country: bool,
        #[case] order: PrefixOrder,
        #[case] expected: &str,
    ) {
        let opts = options(add_number, keep_country, order);
        let namer = ChannelNamer::new(NameNormalizer::global(), &opts);
        assert_eq!(namer.display_name("UK | Sky One", 101), expected);
    }

    #[test]
    fn test_number_without_country() {
        let opts = options(true, true, PrefixOrder::CountryFirst);
        let namer = ChannelNamer::new(NameNormalizer::global(), &opts);
        assert_eq!(namer.display_name("ESPN", 7), "7 - ESPN");
    }
}
