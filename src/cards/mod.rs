pub mod card_id;
pub mod runner_card;
pub mod set_range;
