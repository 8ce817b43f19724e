mod machine;
mod state;

pub(crate) use machine::parse_url;
pub(crate) use state::State;
