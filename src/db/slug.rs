/// Derive a URL-safe slug from a title.
///
/// Lowercases, turns whitespace runs into a single hyphen, drops anything
/// outside `[a-z0-9-]`, collapses repeated hyphens and trims hyphens from both
/// ends. Returns `fallback` when nothing survives.
pub fn generate_slug(title: &str, fallback: &str) -> String {
    let lowered = title.to_lowercase();

    let mut slug = String::with_capacity(lowered.len());
    let mut in_whitespace = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }

    let mut collapsed = String::with_capacity(slug.len());
    for c in slug.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }

    let trimmed = collapsed.trim_matches('-');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Make `base` unique among `existing` ids by appending `-1`, `-2`, ...
///
/// `exclude` is ignored during the check so a record being renamed does not
/// collide with its own previous id.
pub fn unique_slug<'a, I>(base: &str, existing: I, exclude: Option<&str>) -> String
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let taken = |candidate: &str| {
        existing
            .clone()
            .into_iter()
            .filter(|id| exclude != Some(*id))
            .any(|id| id == candidate)
    };

    let mut slug = base.to_string();
    let mut counter = 1;
    while taken(&slug) {
        slug = format!("{}-{}", base, counter);
        counter += 1;
    }
    slug
}

/// Length of the opaque ids handed out to slider images, objectives and dropdown entries.
pub const TOKEN_ID_LEN: usize = 12;

/// Random lowercase hex id of [`TOKEN_ID_LEN`] characters.
pub fn random_hex_id() -> String {
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(TOKEN_ID_LEN);
    id
}

/// Random hex id that does not collide with any of `existing`.
pub fn unique_hex_id<'a, I>(existing: I) -> String
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    loop {
        let candidate = random_hex_id();
        if !existing.clone().into_iter().any(|id| id == candidate) {
            return candidate;
        }
    }
}
