// MarkdownV2 rendering and message packing for channel posts.

use launchwatch_common::AnalyzedProduct;

/// Telegram's per-message text limit.
pub const MESSAGE_LIMIT: usize = 4096;
pub const SEPARATOR: &str = "\n\n───\n\n";

const MARKDOWN_V2_SPECIAL: &[char] = &[
    '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
];

/// Escape free text for MarkdownV2.
pub fn escape_markdown_v2(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if MARKDOWN_V2_SPECIAL.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Escape a URL for use inside `(...)` of an inline link.
pub fn escape_link_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        if c == '\\' || c == ')' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub fn format_product(product: &AnalyzedProduct) -> String {
    let problem = &product.problem;
    format!(
        "🚀 *{name}*\n\n\
         👥 *Customer:* {customer}\n\
         💼 *Job to be Done:* {job}\n\
         ⚡ *Pain Point:* {pain}\n\
         📊 *Success Metric:* {metric}\n\n\
         🔗 *Links:*\n\
         • [Product Website]({product_url})\n\
         • [Original Source]({origin_url})",
        name = escape_markdown_v2(&product.name),
        customer = escape_markdown_v2(&problem.primary_customer),
        job = escape_markdown_v2(&problem.core_job),
        pain = escape_markdown_v2(&problem.main_pain),
        metric = escape_markdown_v2(&problem.success_metric),
        product_url = escape_link_url(&product.product_url),
        origin_url = escape_link_url(&product.origin_url),
    )
}

/// Greedily join blocks with `SEPARATOR` into messages of at most
/// `MESSAGE_LIMIT` characters. A block longer than the limit on its own
/// becomes a single oversized message.
pub fn pack_messages<I>(blocks: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let separator_chars = SEPARATOR.chars().count();
    let mut messages = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0;

    for block in blocks {
        let block_chars = block.chars().count();

        if current.is_empty() {
            current = block;
            current_chars = block_chars;
            continue;
        }

        if current_chars + separator_chars + block_chars > MESSAGE_LIMIT {
            messages.push(std::mem::take(&mut current));
            current = block;
            current_chars = block_chars;
        } else {
            current.push_str(SEPARATOR);
            current.push_str(&block);
            current_chars += separator_chars + block_chars;
        }
    }

    if !current.is_empty() {
        messages.push(current);
    }
    messages
}
