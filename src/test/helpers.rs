use crate::cards::runner_card::RunnerCard;

pub const NOISE_CARD_JSON: &str = include_str!("noise_card.json");

/// Not a real PNG, the cache only stores whatever bytes it is given.
pub const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfake image data";

pub fn noise_runner_card() -> RunnerCard {
    RunnerCard {
        last_modified: "2014-06-19T14:24:00+00:00".to_string(),
        code: "01001".to_string(),
        title: "Noise: Hacker Extraordinaire".to_string(),
        card_type: "Identity".to_string(),
        type_code: "identity".to_string(),
        subtype: "G-mod".to_string(),
        subtype_code: "g-mod".to_string(),
        text: "Whenever you install a <strong>virus</strong> program, the Corp trashes the top card of R&D.".to_string(),
        base_link: 0,
        faction: "Anarch".to_string(),
        faction_code: "anarch".to_string(),
        faction_letter: "a".to_string(),
        flavor: "\"Watch this. It'll be funny.\"".to_string(),
        illustrator: "Ralph Beisner".to_string(),
        influence_limit: 15,
        minimum_deck_size: 45,
        number: 1,
        quantity: 1,
        set_name: "Core Set".to_string(),
        set_code: "core".to_string(),
        side: "Runner".to_string(),
        side_code: "runner".to_string(),
        uniqueness: false,
        cycle_number: 1,
        url: "http://netrunnerdb.com/en/card/01001".to_string(),
        image_src: "/bundles/netrunnerdbcards/images/cards/en/01001.png".to_string(),
        large_image_src: "/bundles/netrunnerdbcards/images/cards/en-large/01001.png".to_string(),
    }
}

pub fn noise_api_response() -> String {
    format!("[{}]", NOISE_CARD_JSON)
}

/// Minimal card whose large image lives at `/images/<code>.png`.
pub fn runner_card(code: &str, title: &str) -> RunnerCard {
    RunnerCard {
        code: code.to_string(),
        title: title.to_string(),
        large_image_src: large_image_path(code),
        ..Default::default()
    }
}

pub fn large_image_path(code: &str) -> String {
    format!("/images/{}.png", code)
}

pub fn api_response_for(card: &RunnerCard) -> String {
    serde_json::to_string(&vec![card]).unwrap()
}
