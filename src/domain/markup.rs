//! HTML 渲染
//!
//! 所有写入 HTML 的用户文本都必须经过 `escape_html`

use super::user::DisplayName;

/// 转义 HTML 特殊字符
///
/// 覆盖元素内容与带引号属性值两种上下文
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// 渲染 profile 更新后的欢迎页
pub fn render_welcome(name: &DisplayName) -> String {
    format!("<h1>Welcome {}</h1>", escape_html(name.as_str()))
}
