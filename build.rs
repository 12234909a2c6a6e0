//! 构建时根据 src/tests/backends.toml 生成测试用后端枚举与 env 变量名常量，供 tests 模块 include! 使用。

use std::env;
use std::fs;
use std::path::Path;

fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut c = part.chars();
            match c.next() {
                None => String::new(),
                Some(first) => first
                    .to_uppercase()
                    .chain(c.flat_map(|c| c.to_lowercase()))
                    .collect(),
            }
        })
        .collect()
}

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let backends_path =
        Path::new(&manifest_dir).join("src/tests/backends.toml");
    println!("cargo:rerun-if-changed=src/tests/backends.toml");
    println!("cargo:rerun-if-changed=src/tests/env/.env.example");
    // env 目录变化（含删除某后端的 .env 文件）时也重新跑，以便从模板恢复缺失的 {id}.env
    println!("cargo:rerun-if-changed=src/tests/env");

    let backend_ids: Vec<String> = if backends_path.exists() {
        let content = fs::read_to_string(&backends_path).unwrap_or_default();
        parse_backends_toml(&content)
    } else {
        vec![]
    };

    let out_dir = env::var("OUT_DIR").unwrap();
    let out_path = Path::new(&out_dir).join("test_backends.rs");

    let mut enum_variants = String::new();
    let mut as_str_arms = String::new();
    let mut all_array = String::new();

    for id in &backend_ids {
        let id = id.trim();
        if id.is_empty()
            || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            continue;
        }
        let variant = to_pascal_case(id);
        if variant.is_empty() {
            continue;
        }
        enum_variants.push_str(&format!("    {},\n", variant));
        as_str_arms.push_str(&format!(
            "            TestBackend::{} => \"{}\",\n",
            variant, id
        ));
        all_array
            .push_str(&format!("            TestBackend::{},\n", variant));
    }

    // 若无任何后端则生成一个占位变体，避免空枚举无法编译
    let (enum_variants, as_str_arms, all_array) = if enum_variants.is_empty() {
        (
            "    #[allow(dead_code)]\n    __None,\n".to_string(),
            "            TestBackend::__None => \"\",\n".to_string(),
            "            TestBackend::__None,\n".to_string(),
        )
    } else {
        (enum_variants, as_str_arms, all_array)
    };

    let code = format!(
        r#"// 自动生成，请勿手改。后端列表来自 src/tests/backends.toml

/// 测试可选的后端部署，用于在测试中手动选择用哪个 env 配置。
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestBackend {{
{variants}
}}

impl TestBackend {{
    /// 返回后端 id（与 env 文件名 {{id}}.env 对应）。
    pub fn as_str(&self) -> &'static str {{
        match self {{
{as_str}
        }}
    }}

    /// 返回所有已配置的后端，便于多部署轮询测试。
    #[allow(dead_code)]
    pub fn all() -> &'static [TestBackend] {{
        static ALL: &[TestBackend] = &[
{array}
        ];
        ALL
    }}
}}

/// 测试 env 文件中所需的环境变量名，便于 IDE 补全与文档。
#[allow(dead_code)]
pub mod env_var_names {{
    /// Snapchat 服务基础地址（建议以 / 结尾）
    pub const SNAP_API_URL: &str = "SNAP_API_URL";
    /// Instagram 服务基础地址（可选）
    pub const IG_API_URL: &str = "IG_API_URL";
}}
"#,
        variants = enum_variants,
        as_str = as_str_arms,
        array = all_array,
    );

    fs::write(out_path, code).expect("write test_backends.rs");

    // 根据 backends 列表自动生成缺失的 env 文件（从 .env.example 复制），用户只需填地址
    let env_dir = Path::new(&manifest_dir).join("src/tests/env");
    let example_path = env_dir.join(".env.example");
    if example_path.exists() {
        let template = fs::read_to_string(&example_path).unwrap_or_default();
        for id in &backend_ids {
            let id = id.trim();
            if id.is_empty()
                || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            {
                continue;
            }
            let env_file = env_dir.join(format!("{}.env", id));
            if !env_file.exists() {
                fs::create_dir_all(&env_dir).ok();
                fs::write(&env_file, &template).expect("write env file");
            }
        }
    }
}

/// 解析 backends.toml：支持 backends = ["a","b"]（含多行数组），
/// 退化为每行一个 id 的纯文本。
fn parse_backends_toml(content: &str) -> Vec<String> {
    let Some(start) = content.find("backends") else {
        return parse_line_per_backend(content);
    };
    let after_key = &content[start + "backends".len()..];
    let Some(open) = after_key.find('[') else {
        return parse_line_per_backend(content);
    };
    let Some(close) = after_key[open..].find(']') else {
        return parse_line_per_backend(content);
    };
    after_key[open + 1..open + close]
        .split(',')
        .map(|s| s.trim().trim_matches('"').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_line_per_backend(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|s| !s.is_empty() && !s.starts_with('#'))
        .collect()
}
