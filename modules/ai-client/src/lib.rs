pub mod claude;
pub mod openai;
pub mod util;

pub use claude::Claude;
pub use openai::{OpenAi, StructuredOutput};
pub use util::{strip_code_blocks, truncate_to_char_boundary};
