use serenity::builder::{CreateActionRow, CreateButton};
use serenity::model::application::ButtonStyle;

/// The remote-control row: previous / pause-or-resume / next / stop.
pub fn remote_buttons(is_paused: bool) -> CreateActionRow {
    let pause_resume = if is_paused {
        CreateButton::new("remote_resume")
            .label("Resume")
            .emoji('▶')
            .style(ButtonStyle::Success)
    } else {
        CreateButton::new("remote_pause")
            .label("Pause")
            .emoji('⏸')
            .style(ButtonStyle::Primary)
    };

    CreateActionRow::Buttons(vec![
        CreateButton::new("remote_previous")
            .emoji('⏮')
            .style(ButtonStyle::Secondary),
        pause_resume,
        CreateButton::new("remote_next")
            .emoji('⏭')
            .style(ButtonStyle::Secondary),
        CreateButton::new("remote_stop")
            .emoji('⏹')
            .style(ButtonStyle::Danger),
    ])
}

pub fn remote_components(is_paused: bool) -> Vec<CreateActionRow> {
    vec![remote_buttons(is_paused)]
}

/// Stateless pager: the current page rides in the custom id
/// (`<kind>_prev_<page>` / `<kind>_next_<page>`), so no session table is
/// needed on the bot side.
pub fn pager_buttons(kind: &str, page: usize) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(format!("{kind}_prev_{page}"))
            .emoji('⬅')
            .style(ButtonStyle::Secondary),
        CreateButton::new(format!("{kind}_next_{page}"))
            .emoji('➡')
            .style(ButtonStyle::Secondary),
        CreateButton::new(format!("{kind}_close"))
            .emoji('❌')
            .style(ButtonStyle::Secondary),
    ])
}

pub fn pager_components(kind: &str, page: usize) -> Vec<CreateActionRow> {
    vec![pager_buttons(kind, page)]
}

/// Parses `<kind>_prev_<page>` style ids back into (direction, page).
pub fn parse_pager_id<'a>(custom_id: &'a str, kind: &str) -> Option<(&'a str, usize)> {
    let rest = custom_id.strip_prefix(kind)?.strip_prefix('_')?;
    if rest == "close" {
        return Some(("close", 0));
    }
    let (direction, page) = rest.split_once('_')?;
    Some((direction, page.parse().ok()?))
}
