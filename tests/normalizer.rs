use rstest::rstest;
use ua_normalizer::Normalizer;

const OPERA_30: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/43.0.2357.65 Safari/537.36 OPR/30.0.1835.59";
const CHROME_IOS: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 10_3 like Mac OS X) AppleWebKit/602.1.50 (KHTML, like Gecko) CriOS/56.0.2924.75 Mobile/14E5239e Safari/602.1";
const EDGE_15: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/52.0.2743.116 Safari/537.36 Edge/15.15063";
const IE_6: &str = "Mozilla/4.0 (compatible; MSIE 6.0; Windows NT 5.1; SV1)";
const IE_7: &str = "Mozilla/4.0 (compatible; MSIE 7.0; Windows NT 6.0)";
const FIREFOX_40: &str = "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:40.0) Gecko/20100101 Firefox/40.1";
const SAFARI_IOS_9: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 9_3_5 like Mac OS X) AppleWebKit/601.1.46 (KHTML, like Gecko) Version/9.0 Mobile/13G36 Safari/601.1";
const FACEBOOK_IOS: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 10_3_1 like Mac OS X) AppleWebKit/603.1.30 (KHTML, like Gecko) Mobile/14E304 [FBAN/FBIOS;FBAV/91.0.0.41.73;FBBV/57050710;FBDV/iPhone8,1]";
const SAMSUNG_5: &str = "Mozilla/5.0 (Linux; Android 7.0; SAMSUNG SM-G930F Build/NRD90M) AppleWebKit/537.36 (KHTML, like Gecko) SamsungBrowser/5.4 Chrome/51.0.2704.106 Mobile Safari/537.36";
const ANDROID_2: &str = "Mozilla/5.0 (Linux; U; Android 2.3.6; en-us; Nexus S Build/GRK39F) AppleWebKit/533.1 (KHTML, like Gecko) Version/4.0 Mobile Safari/533.1";

const SAMPLES: &[&str] = &[
    OPERA_30,
    CHROME_IOS,
    EDGE_15,
    IE_6,
    IE_7,
    FIREFOX_40,
    SAFARI_IOS_9,
    FACEBOOK_IOS,
    SAMSUNG_5,
    ANDROID_2,
    "???",
    "",
    "chrome/43",
    "IE/11.0.3",
    "Mozilla/5.0",
];

#[rstest]
#[case(OPERA_30, "chrome/43.0.0")]
#[case(CHROME_IOS, "ios_chr/56.0.0")]
#[case(EDGE_15, "ie/15.15063.0")]
#[case(IE_6, "ie/6.0.0")]
#[case(FIREFOX_40, "firefox/40.1.0")]
#[case(SAFARI_IOS_9, "ios_saf/9.0.0")]
#[case(FACEBOOK_IOS, "ios_saf/10.3.0")]
#[case(SAMSUNG_5, "samsung_mob/5.4.0")]
#[case(ANDROID_2, "android/2.3.0")]
#[case("???", "other/0.0.0")]
#[case("IE/11.0.3", "ie/11.0.0")]
fn normalize_returns_canonical_form(#[case] user_agent: &str, #[case] expected: &str) {
    assert_eq!(Normalizer::new().normalize(user_agent), expected);
}

#[test]
fn normalize_is_idempotent() {
    let normalizer = Normalizer::new();

    for sample in SAMPLES {
        let once = normalizer.normalize(sample);
        assert_eq!(normalizer.normalize(&once), once, "input: {sample:?}");
    }
}

#[test]
fn classification_ignores_case() {
    let normalizer = Normalizer::new();

    for sample in SAMPLES {
        let expected = normalizer.classify(sample);
        assert_eq!(normalizer.classify(&sample.to_uppercase()), expected, "input: {sample:?}");
        assert_eq!(normalizer.classify(&sample.to_lowercase()), expected, "input: {sample:?}");
    }
}

#[test]
fn version_always_has_zero_patch() {
    let normalizer = Normalizer::new();

    for sample in SAMPLES {
        let version = normalizer.classify(sample).version();
        assert!(version.ends_with(".0"), "{sample:?} gave {version}");
    }
}

#[test]
fn repeated_classification_is_served_from_cache() {
    let normalizer = Normalizer::new();

    let first = normalizer.classify(OPERA_30);
    assert_eq!(normalizer.cache().len(), 1);
    let second = normalizer.classify(OPERA_30);

    assert_eq!(first, second);
    assert_eq!(normalizer.cache().len(), 1);
}

#[test]
fn unparseable_input_is_unknown() {
    let ua = Normalizer::new().classify("???");

    assert!(ua.is_unknown());
    assert!(!ua.satisfies("*"));
    assert_eq!(ua.baseline(), None);
}

#[test]
fn ie_baseline_starts_at_seven() {
    let normalizer = Normalizer::new();

    let ie6 = normalizer.classify(IE_6);
    let ie7 = normalizer.classify(IE_7);

    assert_eq!(ie6.baseline(), Some(">=7"));
    assert!(!ie6.meets_baseline());
    assert!(ie6.is_unknown());
    assert!(ie7.meets_baseline());
    assert!(!ie7.is_unknown());
}

#[rstest]
#[case(OPERA_30, ">=43", true)]
#[case(OPERA_30, "<43", false)]
#[case(EDGE_15, ">=12", true)]
#[case(IE_6, "*", false)]
#[case(FIREFOX_40, "40.1", true)]
#[case(FIREFOX_40, "<=40", true)]
#[case(FIREFOX_40, ">40", false)]
#[case(FIREFOX_40, "~40", true)]
#[case(FIREFOX_40, "38 - 40", true)]
#[case(FIREFOX_40, "not a range", false)]
fn satisfies_checks_requested_range_and_baseline(
    #[case] user_agent: &str,
    #[case] range: &str,
    #[case] expected: bool,
) {
    assert_eq!(Normalizer::new().classify(user_agent).satisfies(range), expected);
}

#[test]
fn default_instance_functions_use_builtin_tables() {
    assert_eq!(ua_normalizer::normalize(EDGE_15), "ie/15.15063.0");
    assert_eq!(ua_normalizer::classify(CHROME_IOS).family(), "ios_chr");
    assert_eq!(
        ua_normalizer::baselines().get("ie").map(String::as_str),
        Some(">=7")
    );
}
