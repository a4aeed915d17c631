//! Ready-made rule sets for the bundled games.
//!
//! Each game is just a `GameRules` value; the session code is shared.
//!
//! | Game | Shape | Sampling | Roles |
//! | --- | --- | --- | --- |
//! | `word_impostor` | role reveal | pooled | 1-2 impostors without the word |
//! | `secret_rule` | role reveal | pooled | 1 rule holder |
//! | `question_cards` | card flip | balanced | none |
//! | `story_chain` | card flip | pooled | none, opening sentence |

mod presets;

pub use presets::{question_cards, secret_rule, story_chain, word_impostor};
