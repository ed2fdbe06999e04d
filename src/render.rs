// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Render the generated files: .editorconfig, .eslintrc.json, lint-staged map, pre-commit hook, LICENSE, README.md
// role: rendering/templates
// inputs: Options flags; manifest metadata; author identity; year
// outputs: File contents as String or serde_json::Value
// invariants:
// - eslint `extends` is exactly eslint:recommended, plugin:node/recommended (+ prettier when enabled, last)
// - rendering is pure; callers decide where and whether to write
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde_json::{json, Value};

use crate::cli::ModuleType;

pub const EDITORCONFIG: &str = "\
root = true

[*]
charset = utf-8
end_of_line = lf
indent_style = space
indent_size = 2
insert_final_newline = true
trim_trailing_whitespace = true

[*.md]
trim_trailing_whitespace = false
";

pub const PRE_COMMIT_HOOK: &str = "npx lint-staged\n";

pub fn eslint_extends(prettier: bool) -> Vec<&'static str> {
  let mut extends = vec!["eslint:recommended", "plugin:node/recommended"];
  if prettier {
    // must come last so it can switch off conflicting style rules
    extends.push("prettier");
  }
  extends
}

pub fn eslint_config(module_type: ModuleType, prettier: bool) -> Value {
  let source_type = match module_type {
    ModuleType::Module => "module",
    ModuleType::CommonJs => "script",
  };

  json!({
    "root": true,
    "env": { "node": true, "es2022": true },
    "parserOptions": { "ecmaVersion": "latest", "sourceType": source_type },
    "extends": eslint_extends(prettier),
  })
}

pub fn lint_staged_config(prettier: bool, eslint: bool) -> Value {
  let mut commands: Vec<&str> = Vec::new();
  if eslint {
    commands.push("eslint --fix");
  }
  if prettier {
    commands.push("prettier --write");
  }

  let mut map = json!({ "*.{js,cjs,mjs}": commands });
  if prettier {
    map["*.{json,md,yml,yaml}"] = json!(["prettier --write"]);
  }
  map
}

pub struct Author {
  pub name: String,
  pub email: String,
}

impl Author {
  pub fn manifest_field(&self) -> String {
    format!("{} <{}>", self.name, self.email)
  }
}

pub fn mit_license(year: i32, author: &Author) -> String {
  format!(
    "MIT License

Copyright (c) {year} {name} <{email}>

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the \"Software\"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
",
    year = year,
    name = author.name,
    email = author.email,
  )
}

/// Metadata the README is rendered from.
pub struct ReadmeParams<'a> {
  pub name: &'a str,
  pub description: Option<&'a str>,
  pub scripts: &'a [(String, String)],
  pub license: Option<&'a str>,
}

pub fn readme(p: &ReadmeParams) -> String {
  let mut out = format!("# {}\n", p.name);

  if let Some(d) = p.description.filter(|d| !d.trim().is_empty()) {
    out.push_str(&format!("\n{}\n", d.trim()));
  }

  out.push_str("\n## Installation\n\n```sh\nnpm install\n```\n");

  if !p.scripts.is_empty() {
    out.push_str("\n## Scripts\n\n");
    for (name, command) in p.scripts {
      out.push_str(&format!("- `npm run {}`: `{}`\n", name, command));
    }
  }

  if let Some(l) = p.license {
    out.push_str(&format!("\n## License\n\n{}\n", l));
  }

  out
}
