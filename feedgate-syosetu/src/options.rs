//! Search options accepted by the Syosetu search route.
//!
//! The route receives the query string of the site's own search form. Every
//! key the form can produce is enumerated here; keys we do not recognize are
//! ignored. An option that is absent, empty, or (for flags) not `1` stays
//! unset and is left out of the upstream request entirely.

use std::str::FromStr;

use feedgate_core::error::{FeedError, Result};

/// Novel type filter (`type`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NovelType {
    /// Short stories (`t`)
    Short,
    /// Ongoing serials (`r`)
    OngoingSerial,
    /// Completed serials (`er`)
    CompletedSerial,
    /// All serials (`re`)
    AllSerials,
    /// Short stories and completed serials (`ter`)
    ShortOrCompleted,
}

impl NovelType {
    /// API value.
    pub fn as_str(&self) -> &'static str {
        match self {
            NovelType::Short => "t",
            NovelType::OngoingSerial => "r",
            NovelType::CompletedSerial => "er",
            NovelType::AllSerials => "re",
            NovelType::ShortOrCompleted => "ter",
        }
    }
}

impl FromStr for NovelType {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "t" => Ok(NovelType::Short),
            "r" => Ok(NovelType::OngoingSerial),
            "er" => Ok(NovelType::CompletedSerial),
            "re" => Ok(NovelType::AllSerials),
            "ter" => Ok(NovelType::ShortOrCompleted),
            other => Err(FeedError::invalid_parameter(
                "type",
                format!("unknown novel type '{}'", other),
            )),
        }
    }
}

/// Result ordering (`order`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum SearchOrder {
    New,
    FavNovelCount,
    ReviewCount,
    Rating,
    RatingAsc,
    ImpressionCount,
    RatingCount,
    RatingCountAsc,
    Weekly,
    LengthDesc,
    LengthAsc,
    NcodeDesc,
    Old,
}

impl SearchOrder {
    /// API value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchOrder::New => "new",
            SearchOrder::FavNovelCount => "favnovelcnt",
            SearchOrder::ReviewCount => "reviewcnt",
            SearchOrder::Rating => "hyoka",
            SearchOrder::RatingAsc => "hyokaasc",
            SearchOrder::ImpressionCount => "impressioncnt",
            SearchOrder::RatingCount => "hyokacnt",
            SearchOrder::RatingCountAsc => "hyokacntasc",
            SearchOrder::Weekly => "weekly",
            SearchOrder::LengthDesc => "lengthdesc",
            SearchOrder::LengthAsc => "lengthasc",
            SearchOrder::NcodeDesc => "ncodedesc",
            SearchOrder::Old => "old",
        }
    }
}

impl FromStr for SearchOrder {
    type Err = FeedError;

    fn from_str(s: &str) -> Result<Self> {
        let order = match s {
            "new" => SearchOrder::New,
            "favnovelcnt" => SearchOrder::FavNovelCount,
            "reviewcnt" => SearchOrder::ReviewCount,
            "hyoka" => SearchOrder::Rating,
            "hyokaasc" => SearchOrder::RatingAsc,
            "impressioncnt" => SearchOrder::ImpressionCount,
            "hyokacnt" => SearchOrder::RatingCount,
            "hyokacntasc" => SearchOrder::RatingCountAsc,
            "weekly" => SearchOrder::Weekly,
            "lengthdesc" => SearchOrder::LengthDesc,
            "lengthasc" => SearchOrder::LengthAsc,
            "ncodedesc" => SearchOrder::NcodeDesc,
            "old" => SearchOrder::Old,
            other => {
                return Err(FeedError::invalid_parameter(
                    "order",
                    format!("unknown order '{}'", other),
                ))
            }
        };
        Ok(order)
    }
}

/// Every filter the search route understands.
///
/// `Option` fields and `false` flags are unset and never reach the API.
/// Set flags are sent as `1`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Search terms (`word`)
    pub word: Option<String>,
    /// Excluded terms (`notword`)
    pub notword: Option<String>,

    /// Match terms against titles (`title`)
    pub in_title: bool,
    /// Match terms against synopses (`ex`)
    pub in_story: bool,
    /// Match terms against keywords (`keyword`)
    pub in_keyword: bool,
    /// Match terms against author names (`wname`)
    pub in_writer: bool,

    /// Hyphen-separated genre codes to include (`genre`)
    pub genre: Option<String>,
    /// Hyphen-separated genre codes to exclude (`notgenre`)
    pub notgenre: Option<String>,

    /// Novel type (`type`)
    pub novel_type: Option<NovelType>,
    /// Result ordering (`order`)
    pub order: Option<SearchOrder>,

    /// Minimum length in characters (`minlen`)
    pub min_length: Option<u64>,
    /// Maximum length in characters (`maxlen`)
    pub max_length: Option<u64>,
    /// Minimum reading time in minutes (`mintime`)
    pub min_time: Option<u64>,
    /// Maximum reading time in minutes (`maxtime`)
    pub max_time: Option<u64>,
    /// Dialogue ratio range, e.g. `10-50` (`kaiwaritu`)
    pub kaiwaritu: Option<String>,
    /// Illustration count range (`sasie`)
    pub sasie: Option<String>,
    /// Last-update window, e.g. `thisweek` (`lastup`)
    pub last_update: Option<String>,

    /// Only R15 (`isr15`)
    pub is_r15: bool,
    /// Only Boys' Love (`isbl`)
    pub is_bl: bool,
    /// Only Girls' Love (`isgl`)
    pub is_gl: bool,
    /// Only cruel depictions (`iszankoku`)
    pub is_zankoku: bool,
    /// Only reincarnation (`istensei`)
    pub is_tensei: bool,
    /// Only transported-to-another-world (`istenni`)
    pub is_tenni: bool,
    /// Reincarnation or transportation (`istt`)
    pub is_tt: bool,
    /// Exclude R15 (`notr15`)
    pub not_r15: bool,
    /// Exclude Boys' Love (`notbl`)
    pub not_bl: bool,
    /// Exclude Girls' Love (`notgl`)
    pub not_gl: bool,
    /// Exclude cruel depictions (`notzankoku`)
    pub not_zankoku: bool,
    /// Exclude reincarnation (`nottensei`)
    pub not_tensei: bool,
    /// Exclude transportation (`nottenni`)
    pub not_tenni: bool,
    /// Exclude long-suspended serials (`stop`)
    pub exclude_stopped: bool,
    /// Only pickup novels (`ispickup`)
    pub pickup: bool,
}

impl SearchOptions {
    /// Parses a site search form query string.
    pub fn from_query(query: &str) -> Result<Self> {
        let mut opts = SearchOptions::default();

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let flag = value == "1";

            match key.as_ref() {
                "word" => opts.word = Some(value.to_string()),
                "notword" => opts.notword = Some(value.to_string()),
                "title" => opts.in_title = flag,
                "ex" => opts.in_story = flag,
                "keyword" => opts.in_keyword = flag,
                "wname" => opts.in_writer = flag,
                "genre" => opts.genre = Some(parse_codes("genre", value)?),
                "notgenre" => opts.notgenre = Some(parse_codes("notgenre", value)?),
                "type" => opts.novel_type = Some(value.parse()?),
                "order" => opts.order = Some(value.parse()?),
                "minlen" => opts.min_length = Some(parse_number("minlen", value)?),
                "maxlen" => opts.max_length = Some(parse_number("maxlen", value)?),
                "mintime" => opts.min_time = Some(parse_number("mintime", value)?),
                "maxtime" => opts.max_time = Some(parse_number("maxtime", value)?),
                "kaiwaritu" => opts.kaiwaritu = Some(value.to_string()),
                "sasie" => opts.sasie = Some(value.to_string()),
                "lastup" => opts.last_update = Some(value.to_string()),
                "isr15" => opts.is_r15 = flag,
                "isbl" => opts.is_bl = flag,
                "isgl" => opts.is_gl = flag,
                "iszankoku" => opts.is_zankoku = flag,
                "istensei" => opts.is_tensei = flag,
                "istenni" => opts.is_tenni = flag,
                "istt" => opts.is_tt = flag,
                "notr15" => opts.not_r15 = flag,
                "notbl" => opts.not_bl = flag,
                "notgl" => opts.not_gl = flag,
                "notzankoku" => opts.not_zankoku = flag,
                "nottensei" => opts.not_tensei = flag,
                "nottenni" => opts.not_tenni = flag,
                "stop" => opts.exclude_stopped = flag,
                "ispickup" => opts.pickup = flag,
                _ => {}
            }
        }

        Ok(opts)
    }

    /// API parameters for every set option, in a fixed order.
    pub fn api_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        let text = [
            ("word", &self.word),
            ("notword", &self.notword),
        ];
        push_text(&mut params, &text);

        let search_in = [
            ("title", self.in_title),
            ("ex", self.in_story),
            ("keyword", self.in_keyword),
            ("wname", self.in_writer),
        ];
        push_flags(&mut params, &search_in);

        push_text(&mut params, &[("genre", &self.genre), ("notgenre", &self.notgenre)]);

        if let Some(t) = self.novel_type {
            params.push(("type", t.as_str().to_string()));
        }
        if let Some(o) = self.order {
            params.push(("order", o.as_str().to_string()));
        }

        let numbers = [
            ("minlen", self.min_length),
            ("maxlen", self.max_length),
            ("mintime", self.min_time),
            ("maxtime", self.max_time),
        ];
        for (name, value) in numbers {
            if let Some(v) = value {
                params.push((name, v.to_string()));
            }
        }

        let ranges = [
            ("kaiwaritu", &self.kaiwaritu),
            ("sasie", &self.sasie),
            ("lastup", &self.last_update),
        ];
        push_text(&mut params, &ranges);

        let flags = [
            ("isr15", self.is_r15),
            ("isbl", self.is_bl),
            ("isgl", self.is_gl),
            ("iszankoku", self.is_zankoku),
            ("istensei", self.is_tensei),
            ("istenni", self.is_tenni),
            ("istt", self.is_tt),
            ("notr15", self.not_r15),
            ("notbl", self.not_bl),
            ("notgl", self.not_gl),
            ("notzankoku", self.not_zankoku),
            ("nottensei", self.not_tensei),
            ("nottenni", self.not_tenni),
            ("stop", self.exclude_stopped),
            ("ispickup", self.pickup),
        ];
        push_flags(&mut params, &flags);

        params
    }
}

fn push_text(params: &mut Vec<(&'static str, String)>, fields: &[(&'static str, &Option<String>)]) {
    for (name, value) in fields {
        if let Some(v) = value {
            params.push((*name, v.clone()));
        }
    }
}

fn push_flags(params: &mut Vec<(&'static str, String)>, flags: &[(&'static str, bool)]) {
    for (name, set) in flags {
        if *set {
            params.push((*name, "1".to_string()));
        }
    }
}

fn parse_number(name: &str, value: &str) -> Result<u64> {
    value
        .parse()
        .map_err(|_| FeedError::invalid_parameter(name, format!("'{}' is not a number", value)))
}

fn parse_codes(name: &str, value: &str) -> Result<String> {
    let valid = value
        .split('-')
        .all(|code| !code.is_empty() && code.bytes().all(|b| b.is_ascii_digit()));
    if valid {
        Ok(value.to_string())
    } else {
        Err(FeedError::invalid_parameter(
            name,
            format!("'{}' is not a hyphen-separated list of genre codes", value),
        ))
    }
}
