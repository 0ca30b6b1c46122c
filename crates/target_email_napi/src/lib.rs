//! Email client targeting for stylesheets, exposed to Node.js.

mod error;

#[cfg(all(
    feature = "allocator",
    not(any(
        target_arch = "arm",
        target_os = "freebsd",
        target_os = "windows",
        target_family = "wasm"
    ))
))]
#[global_allocator]
static ALLOC: mimalloc_safe::MiMalloc = mimalloc_safe::MiMalloc;

use std::mem;

use napi::{Task, bindgen_prelude::AsyncTask};
use napi_derive::napi;

use crate::error::TransformDiagnostic;

/// Options for transforming a stylesheet.
#[napi(object)]
#[derive(Default)]
pub struct TransformOptions {
    /// Class treated as an alias for the `body` tag.
    ///
    /// @default "body"
    pub body_class: Option<String>,

    /// Emit a comment before each expanded client naming it, with a
    /// `: unsupported` suffix for unknown clients.
    ///
    /// @default false
    pub comment: Option<bool>,

    /// Name of the at-rule to expand, without the `@`.
    ///
    /// @default "client"
    pub at_rule_name: Option<String>,
}

/// Result of transforming a stylesheet.
#[napi(object)]
pub struct TransformResult {
    /// The transformed CSS.
    pub code: String,
    /// Rules left unconverted and why.
    pub diagnostics: Vec<TransformDiagnostic>,
}

fn to_core_options(options: &TransformOptions) -> target_email::TransformOptions {
    let mut core = target_email::TransformOptions::new().with_comment(options.comment.unwrap_or(false));
    if let Some(body_class) = &options.body_class {
        core = core.with_body_class(body_class.as_str());
    }
    if let Some(at_rule_name) = &options.at_rule_name {
        core = core.with_at_rule_name(at_rule_name.as_str());
    }
    core
}

fn transform_impl(css: &str, options: &TransformOptions) -> TransformResult {
    let result = target_email::transform(css, &to_core_options(options));
    TransformResult {
        code: result.code,
        diagnostics: TransformDiagnostic::from_diagnostics(result.diagnostics),
    }
}

/// Expand `@client` at-rules synchronously on the current thread.
///
/// @example
/// ```javascript
/// import { transformSync } from 'target-email';
///
/// const { code } = transformSync('@client gmail { .cta { color: red; } }');
/// console.log(code); // u + .body .cta { color: red; }
/// ```
#[napi]
pub fn transform_sync(css: String, options: Option<TransformOptions>) -> TransformResult {
    let options = options.unwrap_or_default();
    transform_impl(&css, &options)
}

pub struct TransformTask {
    css: String,
    options: TransformOptions,
}

#[napi]
impl Task for TransformTask {
    type JsValue = TransformResult;
    type Output = TransformResult;

    fn compute(&mut self) -> napi::Result<Self::Output> {
        let css = mem::take(&mut self.css);
        Ok(transform_impl(&css, &self.options))
    }

    fn resolve(&mut self, _: napi::Env, result: Self::Output) -> napi::Result<Self::JsValue> {
        Ok(result)
    }
}

/// Expand `@client` at-rules asynchronously on a separate thread.
///
/// `transformSync` is usually preferable since stylesheets are small and it
/// avoids the overhead of a thread hop.
#[napi]
pub fn transform(css: String, options: Option<TransformOptions>) -> AsyncTask<TransformTask> {
    let options = options.unwrap_or_default();
    AsyncTask::new(TransformTask { css, options })
}
