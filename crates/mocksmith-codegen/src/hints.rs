//! Identifier-driven hints.
//!
//! Property and declaration names carry intent ("companyName",
//! "avatarUrl") that the type system cannot express. Matching names
//! against a fixed rule list plants hints in the traversal context;
//! leaf dispatch later reads them, discounted by how far the
//! traversal has moved since the name was seen.

/// What flavor of full-name synthesis a name hint asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamePart {
    First,
    Middle,
    Last,
    Full,
    /// A "...name" property inside a company-flavored scope.
    Generic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HintKind {
    Company,
    Human,
    Name(NamePart),
    Currency,
    Id,
    Url,
    CurrencyCode,
    Avatar,
}

/// A planted hint plus its distance from the identifier that planted
/// it. Level 0 means "planted right here"; each structural step down
/// the tree adds one, except arrays and unions which are transparent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hint {
    pub kind: HintKind,
    pub level: u32,
}

impl Hint {
    pub fn planted(kind: HintKind) -> Self {
        Self { kind, level: 0 }
    }

    pub fn aged(self) -> Self {
        Self {
            level: self.level + 1,
            ..self
        }
    }
}

fn contains_any(name: &str, needles: &[&str]) -> bool {
    let lowered = name.to_lowercase();
    needles
        .iter()
        .any(|needle| lowered.contains(&needle.to_lowercase()))
}

fn find_name_part(name: &str, visible: &[Hint]) -> Option<NamePart> {
    if contains_any(name, &["firstName", "givenName"]) {
        return Some(NamePart::First);
    }
    if contains_any(name, &["lastName", "familyName"]) {
        return Some(NamePart::Last);
    }
    if contains_any(name, &["middleName"]) {
        return Some(NamePart::Middle);
    }
    if name == "name" || name == "fullName" {
        return Some(NamePart::Full);
    }
    let company_nearby = visible
        .iter()
        .any(|hint| hint.kind == HintKind::Company && hint.level <= 1);
    if company_nearby && name.to_lowercase().contains("name") {
        return Some(NamePart::Generic);
    }
    None
}

/// Run the identifier rules against one name.
///
/// Rules fire in a fixed order and each rule sees the hints planted by
/// the rules before it in the same pass, on top of the already-visible
/// inherited hints.
pub fn identifier_hints(name: &str, inherited: &[Hint]) -> Vec<Hint> {
    let mut planted: Vec<Hint> = Vec::new();

    {
        let visible = |planted: &[Hint]| -> Vec<Hint> {
            inherited.iter().copied().chain(planted.iter().copied()).collect()
        };

        if contains_any(name, &["company", "organization", "merchant"]) {
            planted.push(Hint::planted(HintKind::Company));
        }
        if contains_any(
            name,
            &[
                "reviewer", "human", "person", "user", "profile", "reviewers", "employee",
            ],
        ) {
            planted.push(Hint::planted(HintKind::Human));
        }
        if let Some(part) = find_name_part(name, &visible(&planted)) {
            planted.push(Hint::planted(HintKind::Name(part)));
        }
        if matches!(name.to_lowercase().as_str(), "currency" | "money") {
            planted.push(Hint::planted(HintKind::Currency));
        }
        if contains_any(name, &["id", "uuid"]) {
            planted.push(Hint::planted(HintKind::Id));
        }
        if contains_any(name, &["url"]) {
            planted.push(Hint::planted(HintKind::Url));
        }
        let currency_nearby = visible(&planted)
            .iter()
            .any(|hint| hint.kind == HintKind::Currency && hint.level <= 1);
        if contains_any(name, &["currencyCode", "currencyUnit"])
            || (currency_nearby && contains_any(name, &["code"]))
        {
            planted.push(Hint::planted(HintKind::CurrencyCode));
        }
        if contains_any(name, &["avatar"]) {
            planted.push(Hint::planted(HintKind::Avatar));
        }
    }

    planted
}
