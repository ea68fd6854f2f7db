//! Action-verb vocabularies used to name happy-path steps.

use oaf_core::{EndpointInfo, HttpMethod, Locale};

/// Methods that carry their own verb set. PATCH shares PUT's verbs.
const VERB_METHODS: [HttpMethod; 4] = [
    HttpMethod::Post,
    HttpMethod::Get,
    HttpMethod::Put,
    HttpMethod::Delete,
];

/// A locale-specific set of action verbs per HTTP method.
pub trait VerbTable: Send + Sync {
    /// Verbs for `method`, canonical verb first. Empty for methods without
    /// a verb set.
    fn verbs(&self, method: HttpMethod) -> &'static [&'static str];

    /// Whether `text` already contains a verb from any method's set.
    fn contains_verb(&self, text: &str) -> bool;

    /// Join a verb with the rest of a step name.
    fn compose(&self, verb: &str, subject: &str) -> String;

    fn canonical(&self, method: HttpMethod) -> &'static str {
        self.verbs(method).first().copied().unwrap_or_default()
    }

    fn all_verbs(&self) -> Vec<&'static str> {
        VERB_METHODS
            .iter()
            .flat_map(|method| self.verbs(*method).iter().copied())
            .collect()
    }
}

/// Traditional Chinese verbs, matched as substrings.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZhTwVerbs;

impl VerbTable for ZhTwVerbs {
    fn verbs(&self, method: HttpMethod) -> &'static [&'static str] {
        match method {
            HttpMethod::Post => &["建立", "新增", "註冊", "創建", "提交", "登入"],
            HttpMethod::Get => &["取得", "查詢", "獲取", "列出", "檢視", "讀取"],
            HttpMethod::Put | HttpMethod::Patch => &["更新", "修改", "編輯"],
            HttpMethod::Delete => &["刪除", "移除"],
            _ => &[],
        }
    }

    fn contains_verb(&self, text: &str) -> bool {
        self.all_verbs().iter().any(|verb| text.contains(verb))
    }

    fn compose(&self, verb: &str, subject: &str) -> String {
        // Latin identifiers read better with a space after the verb
        if subject.starts_with(|c: char| c.is_ascii_alphanumeric()) {
            format!("{verb} {subject}")
        } else {
            format!("{verb}{subject}")
        }
    }
}

/// English verbs, matched as whole words regardless of case.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnVerbs;

impl VerbTable for EnVerbs {
    fn verbs(&self, method: HttpMethod) -> &'static [&'static str] {
        match method {
            HttpMethod::Post => &["Create", "Add", "Register", "Submit", "Login", "Sign"],
            HttpMethod::Get => &["Get", "Fetch", "List", "Retrieve", "Find", "Read", "View", "Show"],
            HttpMethod::Put | HttpMethod::Patch => &["Update", "Modify", "Edit", "Change", "Patch"],
            HttpMethod::Delete => &["Delete", "Remove"],
            _ => &[],
        }
    }

    fn contains_verb(&self, text: &str) -> bool {
        let verbs = self.all_verbs();
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .any(|word| verbs.iter().any(|verb| verb.eq_ignore_ascii_case(word)))
    }

    fn compose(&self, verb: &str, subject: &str) -> String {
        format!("{verb} {subject}")
    }
}

static ZH_TW: ZhTwVerbs = ZhTwVerbs;
static EN: EnVerbs = EnVerbs;

/// The verb table for a locale.
pub fn verb_table(locale: Locale) -> &'static dyn VerbTable {
    match locale {
        Locale::ZhTw => &ZH_TW,
        Locale::En => &EN,
    }
}

/// Name a happy-path step. A summary that already contains any action verb
/// is used verbatim; otherwise the method's canonical verb is prepended to
/// the summary, or to the operation name when there is no summary.
pub fn step_name(endpoint: &EndpointInfo, table: &dyn VerbTable) -> String {
    let verb = table.canonical(endpoint.method);
    match endpoint.summary.as_deref().map(str::trim) {
        Some(summary) if !summary.is_empty() => {
            if table.contains_verb(summary) || verb.is_empty() {
                summary.to_string()
            } else {
                table.compose(verb, summary)
            }
        }
        _ if verb.is_empty() => endpoint.operation_name(),
        _ => table.compose(verb, &endpoint.operation_name()),
    }
}
