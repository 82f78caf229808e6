// Profile scoring: term weighting, the five-criterion rubric, batch ranking.
// Criteria are pure functions; the engine composes them and the ranking pass
// shares one fitted vocabulary across the whole batch.

pub mod criteria;
pub mod engine;
pub mod handlers;
pub mod ranking;
pub mod stop_words;
pub mod vocabulary;
