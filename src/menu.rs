use crate::model::{Grouping, Item, Menu, Role, Screen};

/// Key of the category index screen.
pub const ROOT_KEY: &str = "channels";
pub const ROOT_TITLE: &str = "channels";
/// Key of the player's main menu, owned by the host file.
pub const HOME_KEY: &str = "main";
pub const BACK_LABEL: &str = "BACK";

/// Top-level screen keys the host defines itself or that this tool emits
/// for the index; a category with one of these names would shadow it.
pub const RESERVED_KEYS: &[&str] = &[ROOT_KEY, HOME_KEY, "options", "info"];

// Banner is HEADER_CORE chars plus one space each side of the title.
const HEADER_CORE: usize = 22;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuStats {
    pub categories: usize,
    pub items: usize,
    pub skipped: usize,
}

/// `------- CHANNELS -------`
pub fn format_header(title: &str) -> String {
    let len = title.chars().count();
    let pad = HEADER_CORE.saturating_sub(len) / 2;
    let parity = len < HEADER_CORE && len % 2 == 1;

    let mut out = String::with_capacity(HEADER_CORE + 2 + title.len());
    out.push_str(&"-".repeat(pad));
    out.push(' ');
    out.push_str(&title.to_uppercase());
    out.push(' ');
    out.push_str(&"-".repeat(pad));
    if parity {
        out.push('-');
    }
    out
}

pub fn build(grouping: &Grouping) -> Menu {
    let mut root_items: Vec<Item> = grouping
        .keys()
        .map(|category| Item::navigate(category.to_uppercase(), category.as_str()))
        .collect();
    root_items.push(Item::navigate(BACK_LABEL, HOME_KEY));

    let mut screens = Vec::with_capacity(grouping.len() + 1);
    screens.push(Screen {
        key: ROOT_KEY.to_string(),
        header: format_header(ROOT_TITLE),
        items: root_items,
    });

    for (category, groups) in grouping {
        let mut items: Vec<Item> = groups
            .iter()
            .filter_map(|(base_id, files)| {
                let video = files.get(&Role::Video)?;
                Some(Item::play(
                    base_id.as_str(),
                    video.as_str(),
                    files.get(&Role::Audio).cloned(),
                    files.get(&Role::Subtitles).cloned(),
                ))
            })
            .collect();
        // single level only: categories always return to the index
        items.push(Item::navigate(BACK_LABEL, ROOT_KEY));

        screens.push(Screen {
            key: category.clone(),
            header: format_header(category),
            items,
        });
    }

    Menu { screens }
}

/// Counts of what `build` will emit and what it drops for lack of a video.
pub fn stats(grouping: &Grouping) -> MenuStats {
    grouping
        .values()
        .flat_map(|groups| groups.values())
        .fold(
            MenuStats {
                categories: grouping.len(),
                ..MenuStats::default()
            },
            |mut acc, files| {
                if files.contains_key(&Role::Video) {
                    acc.items += 1;
                } else {
                    acc.skipped += 1;
                }
                acc
            },
        )
}
