//! Signature lookup for the call under the cursor.
//!
//! Locating the call is pure (`scanner::locate_call`); turning the callee name into a
//! signature is delegated to a [`CallableResolver`]. Resolvers may run arbitrary host code,
//! so their errors and panics stop at this boundary and just mean "no signature".

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use scanner::{ActiveParameter, Span, locate_call};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ResolveError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    /// Source text of the default value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
        }
    }

    fn render(&self) -> String {
        match &self.default {
            Some(default) => format!("{}={}", self.name, default),
            None => self.name.clone(),
        }
    }
}

/// A callable's parameter list.
///
/// For a bound method `params` still starts with the receiver; it is skipped when arguments
/// are matched to parameters and when rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
    pub name: String,
    pub params: Vec<Param>,
    pub varargs: Option<String>,
    pub varkw: Option<String>,
    pub kwonly: Vec<Param>,
    pub is_bound_method: bool,
}

impl Signature {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builds a signature from parameter notation: `*name` and `**name` are the variadic
    /// parameters, a bare `*` starts the keyword-only ones, `name=default` has a default.
    pub fn from_params(name: impl Into<String>, params: &[&str]) -> Self {
        let mut signature = Self::new(name);
        let mut keyword_only = false;
        for &param in params {
            if let Some(varkw) = param.strip_prefix("**") {
                signature = signature.varkw(varkw);
                continue;
            }
            if let Some(varargs) = param.strip_prefix('*') {
                if !varargs.is_empty() {
                    signature = signature.varargs(varargs);
                }
                keyword_only = true;
                continue;
            }
            let param = match param.split_once('=') {
                Some((param, default)) => Param::with_default(param, default),
                None => Param::new(param),
            };
            signature = if keyword_only {
                signature.kwonly(param)
            } else {
                signature.param(param)
            };
        }
        signature
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn params<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params.extend(names.into_iter().map(Param::new));
        self
    }

    pub fn varargs(mut self, name: impl Into<String>) -> Self {
        self.varargs = Some(name.into());
        self
    }

    pub fn varkw(mut self, name: impl Into<String>) -> Self {
        self.varkw = Some(name.into());
        self
    }

    pub fn kwonly(mut self, param: Param) -> Self {
        self.kwonly.push(param);
        self
    }

    pub fn bound(mut self) -> Self {
        self.is_bound_method = true;
        self
    }

    /// Parameters an argument list fills, without the receiver of a bound method.
    pub fn visible_params(&self) -> &[Param] {
        match self.params.split_first() {
            Some((_, rest)) if self.is_bound_method => rest,
            _ => &self.params,
        }
    }
}

/// Turns a dotted callee name into a signature. Supplied by the host.
pub trait CallableResolver {
    fn resolve(&self, name: &str) -> Result<Signature, ResolveError>;
}

impl<F> CallableResolver for F
where
    F: Fn(&str) -> Result<Signature, ResolveError>,
{
    fn resolve(&self, name: &str) -> Result<Signature, ResolveError> {
        self(name)
    }
}

/// The slot of a signature an argument binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundParam<'a> {
    Param(&'a Param),
    VarArgs(&'a str),
    KeywordOnly(&'a Param),
    VarKeywords(&'a str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgspecResult {
    pub function_name: String,
    pub signature: Signature,
    pub active_parameter: Option<ActiveParameter>,
    pub is_bound_method: bool,
    pub callee: Span,
}

impl ArgspecResult {
    /// The parameter the argument under the cursor fills, if it can be told.
    pub fn bound_param(&self) -> Option<BoundParam<'_>> {
        let sig = &self.signature;
        let params = sig.visible_params();
        match self.active_parameter.as_ref()? {
            ActiveParameter::Positional(i) => match params.get(*i) {
                Some(param) => Some(BoundParam::Param(param)),
                None => sig.varargs.as_deref().map(BoundParam::VarArgs),
            },
            ActiveParameter::Keyword(name) => {
                if let Some(param) = params.iter().find(|p| &p.name == name) {
                    Some(BoundParam::Param(param))
                } else if let Some(param) = sig.kwonly.iter().find(|p| &p.name == name) {
                    Some(BoundParam::KeywordOnly(param))
                } else {
                    sig.varkw.as_deref().map(BoundParam::VarKeywords)
                }
            }
        }
    }

    /// One-line rendering such as `spam(a, [b=1], *args)`, the bound slot in brackets.
    pub fn render(&self) -> String {
        let sig = &self.signature;
        let active = self.bound_param();
        let mark = |text: String, is_active: bool| {
            if is_active { format!("[{text}]") } else { text }
        };

        let mut parts = Vec::new();
        for param in sig.visible_params() {
            let is_active = active == Some(BoundParam::Param(param));
            parts.push(mark(param.render(), is_active));
        }
        match &sig.varargs {
            Some(name) => {
                let is_active = active == Some(BoundParam::VarArgs(name));
                parts.push(mark(format!("*{name}"), is_active));
            }
            None if !sig.kwonly.is_empty() => parts.push("*".to_string()),
            None => {}
        }
        for param in &sig.kwonly {
            let is_active = active == Some(BoundParam::KeywordOnly(param));
            parts.push(mark(param.render(), is_active));
        }
        if let Some(name) = &sig.varkw {
            let is_active = active == Some(BoundParam::VarKeywords(name));
            parts.push(mark(format!("**{name}"), is_active));
        }

        format!("{}({})", self.function_name, parts.join(", "))
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

/// Signature help for the innermost unclosed call left of `cursor`.
///
/// `None` when there is no call, when the bracketing is malformed, or when `resolver`
/// fails or panics. The resolver is asked once per call.
pub fn get_argspec(
    cursor: usize,
    line: &str,
    resolver: &dyn CallableResolver,
) -> Option<ArgspecResult> {
    let site = locate_call(cursor, line)?;
    let name = site.callee.text.as_str();

    let signature = match panic::catch_unwind(AssertUnwindSafe(|| resolver.resolve(name))) {
        Ok(Ok(signature)) => signature,
        Ok(Err(err)) => {
            debug!(callee = name, error = %err, "no signature for callee");
            return None;
        }
        Err(payload) => {
            warn!(
                callee = name,
                panic = panic_message(payload.as_ref()),
                "callable resolver panicked"
            );
            return None;
        }
    };

    let function_name = if signature.name.is_empty() {
        name.rsplit('.').next().unwrap_or(name).to_string()
    } else {
        signature.name.clone()
    };

    Some(ArgspecResult {
        function_name,
        is_bound_method: signature.is_bound_method,
        signature,
        active_parameter: site.active,
        callee: site.callee,
    })
}
