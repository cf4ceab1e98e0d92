/// A country selectable as an affiliation filter, with the aliases that
/// identify it in author-affiliation text (country names, cities, institutions).
#[derive(Debug)]
pub struct Country {
    pub code: &'static str,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

pub const COUNTRIES: &[Country] = &[
    Country {
        code: "AU",
        name: "Australia",
        aliases: &[
            "Australia",
            "Sydney",
            "Melbourne",
            "Brisbane",
            "Perth",
            "Adelaide",
            "Canberra",
            "Queensland",
            "Victoria",
            "New South Wales",
            "UNSW",
            "University of Sydney",
            "Monash",
            "University of Melbourne",
        ],
    },
    Country {
        code: "UK",
        name: "United Kingdom",
        aliases: &[
            "United Kingdom",
            "UK",
            "England",
            "Scotland",
            "Wales",
            "London",
            "Manchester",
            "Birmingham",
            "Edinburgh",
            "Glasgow",
            "Oxford",
            "Cambridge",
            "Imperial College",
            "UCL",
            "Kings College",
            "NHS",
        ],
    },
    Country {
        code: "US",
        name: "United States",
        aliases: &[
            "United States",
            "USA",
            "U.S.A",
            "America",
            "New York",
            "Los Angeles",
            "Chicago",
            "Boston",
            "San Francisco",
            "Houston",
            "Philadelphia",
            "California",
            "Texas",
            "Massachusetts",
            "Harvard",
            "Stanford",
            "MIT",
            "Johns Hopkins",
            "Mayo Clinic",
            "Yale",
            "Columbia",
            "UCLA",
            "NIH",
            "CDC",
        ],
    },
    Country {
        code: "CA",
        name: "Canada",
        aliases: &[
            "Canada",
            "Toronto",
            "Vancouver",
            "Montreal",
            "Ottawa",
            "Calgary",
            "Edmonton",
            "Ontario",
            "Quebec",
            "British Columbia",
            "Alberta",
            "McGill",
            "University of Toronto",
            "UBC",
        ],
    },
    Country {
        code: "DE",
        name: "Germany",
        aliases: &[
            "Germany",
            "Deutschland",
            "Berlin",
            "Munich",
            "Hamburg",
            "Frankfurt",
            "Cologne",
            "Heidelberg",
            "Charite",
            "Max Planck",
            "Ludwig Maximilian",
            "Humboldt",
        ],
    },
    Country {
        code: "FR",
        name: "France",
        aliases: &[
            "France",
            "Paris",
            "Lyon",
            "Marseille",
            "Toulouse",
            "Bordeaux",
            "Sorbonne",
            "INSERM",
            "Institut Pasteur",
            "AP-HP",
        ],
    },
    Country {
        code: "IT",
        name: "Italy",
        aliases: &[
            "Italy",
            "Italia",
            "Rome",
            "Milan",
            "Florence",
            "Naples",
            "Turin",
            "Bologna",
            "Sapienza",
            "San Raffaele",
        ],
    },
    Country {
        code: "ES",
        name: "Spain",
        aliases: &[
            "Spain",
            "España",
            "Madrid",
            "Barcelona",
            "Valencia",
            "Seville",
            "Hospital Clinic",
            "CIBERES",
        ],
    },
    Country {
        code: "NL",
        name: "Netherlands",
        aliases: &[
            "Netherlands",
            "Holland",
            "Amsterdam",
            "Rotterdam",
            "Utrecht",
            "Leiden",
            "Erasmus",
            "UMC",
        ],
    },
    Country {
        code: "SE",
        name: "Sweden",
        aliases: &[
            "Sweden",
            "Stockholm",
            "Gothenburg",
            "Malmo",
            "Uppsala",
            "Karolinska",
        ],
    },
    Country {
        code: "CH",
        name: "Switzerland",
        aliases: &[
            "Switzerland",
            "Zurich",
            "Geneva",
            "Basel",
            "Bern",
            "ETH",
            "EPFL",
            "Roche",
            "Novartis",
        ],
    },
    Country {
        code: "JP",
        name: "Japan",
        aliases: &[
            "Japan",
            "Tokyo",
            "Osaka",
            "Kyoto",
            "Yokohama",
            "Nagoya",
            "University of Tokyo",
            "Keio",
            "Waseda",
        ],
    },
    Country {
        code: "CN",
        name: "China",
        aliases: &[
            "China",
            "Chinese",
            "Beijing",
            "Shanghai",
            "Guangzhou",
            "Shenzhen",
            "Wuhan",
            "Hangzhou",
            "Peking University",
            "Tsinghua",
            "Fudan",
            "Zhejiang",
        ],
    },
    Country {
        code: "KR",
        name: "South Korea",
        aliases: &[
            "South Korea",
            "Korea",
            "Seoul",
            "Busan",
            "Incheon",
            "Seoul National",
            "Yonsei",
            "Samsung Medical",
        ],
    },
    Country {
        code: "IN",
        name: "India",
        aliases: &[
            "India",
            "Mumbai",
            "Delhi",
            "Bangalore",
            "Chennai",
            "Kolkata",
            "Hyderabad",
            "AIIMS",
            "Tata Memorial",
        ],
    },
    Country {
        code: "BR",
        name: "Brazil",
        aliases: &[
            "Brazil",
            "Brasil",
            "Sao Paulo",
            "Rio de Janeiro",
            "Brasilia",
            "USP",
            "FIOCRUZ",
        ],
    },
    Country {
        code: "MX",
        name: "Mexico",
        aliases: &[
            "Mexico",
            "México",
            "Mexico City",
            "Guadalajara",
            "Monterrey",
            "UNAM",
        ],
    },
    Country {
        code: "IL",
        name: "Israel",
        aliases: &[
            "Israel",
            "Tel Aviv",
            "Jerusalem",
            "Haifa",
            "Weizmann",
            "Hebrew University",
            "Technion",
            "Hadassah",
        ],
    },
    Country {
        code: "SG",
        name: "Singapore",
        aliases: &["Singapore", "NUS", "Nanyang", "Duke-NUS"],
    },
    Country {
        code: "NZ",
        name: "New Zealand",
        aliases: &[
            "New Zealand",
            "Auckland",
            "Wellington",
            "Christchurch",
            "University of Auckland",
            "Otago",
        ],
    },
];

/// Look up a country by its code (case-insensitive).
pub fn lookup(code: &str) -> Option<&'static Country> {
    COUNTRIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
}

/// All aliases of the given countries, in selection order. Unknown codes are skipped.
pub fn affiliation_aliases<S: AsRef<str>>(codes: &[S]) -> Vec<&'static str> {
    codes
        .iter()
        .filter_map(|code| lookup(code.as_ref()))
        .flat_map(|country| country.aliases.iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_unique() {
        let mut codes: Vec<_> = COUNTRIES.iter().map(|c| c.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), COUNTRIES.len());
    }

    #[test]
    fn every_country_lists_its_own_name() {
        for country in COUNTRIES {
            assert!(
                country.aliases.contains(&country.name),
                "{} should include its name as an alias",
                country.code
            );
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(lookup("ca").map(|c| c.name), Some("Canada"));
        assert!(lookup("XX").is_none());
    }

    #[test]
    fn aliases_follow_selection_order_and_skip_unknown() {
        let aliases = affiliation_aliases(&["SG", "ZZ", "NZ"]);
        assert_eq!(aliases.first(), Some(&"Singapore"));
        assert_eq!(aliases[4], "New Zealand");
        assert_eq!(aliases.len(), 4 + 6);
    }

    #[test]
    fn no_known_codes_yields_nothing() {
        assert!(affiliation_aliases(&["ZZ"]).is_empty());
        assert!(affiliation_aliases::<&str>(&[]).is_empty());
    }
}
