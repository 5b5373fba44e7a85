use serde::{Deserialize, Serialize};

/// Stable identity for a declaration, already canonicalized by the front
/// end (same entity across redeclarations gets the same id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeclId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclKind {
    Function,
    Method { is_virtual: bool },
    Var,
    EnumConstant,
    Field,
    Record,
    Typedef,
    Other,
}

impl DeclKind {
    pub fn is_function_or_method(&self) -> bool {
        matches!(self, DeclKind::Function | DeclKind::Method { .. })
    }

    pub fn is_virtual_method(&self) -> bool {
        matches!(self, DeclKind::Method { is_virtual: true })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRange {
    pub start_line: u32,
    pub end_line: u32,
}

/// The type of a function, as seen through a function pointer or a
/// direct declaration. Two types are compatible only when every field
/// matches and both have a prototype — a function with no prototype
/// cannot be matched against anything, including another no-prototype
/// function, since there's nothing to compare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FunctionType {
    pub return_type: String,
    pub params: Vec<String>,
    pub variadic: bool,
    pub has_proto: bool,
}

impl FunctionType {
    pub fn compatible_with(&self, other: &FunctionType) -> bool {
        self.has_proto
            && other.has_proto
            && self.return_type == other.return_type
            && self.params == other.params
            && self.variadic == other.variadic
    }
}

/// One node of an expression walked for initializer taint propagation.
/// `ConstructCall` is a deliberate leaf: global-constant taint does not
/// propagate through a constructor invocation, so whatever the
/// constructor call contains is never represented here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum InitExpr {
    DeclRef(DeclId),
    MemberRef(DeclId),
    ConstructCall,
    Seq(Vec<InitExpr>),
}

impl InitExpr {
    pub fn collect_refs(&self, out: &mut Vec<DeclId>) {
        match self {
            InitExpr::DeclRef(d) | InitExpr::MemberRef(d) => out.push(*d),
            InitExpr::ConstructCall => {}
            InitExpr::Seq(items) => {
                for item in items {
                    item.collect_refs(out);
                }
            }
        }
    }
}

/// The resolved callee of a call expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CalleeKind {
    Direct(DeclId),
    Virtual(DeclId),
    FunctionPointer(FunctionType),
}

/// One flattened event from a function body, in source order. This
/// stands in for the per-expression hooks a real AST walk would fire
/// (`VisitDeclRefExpr`, `VisitMemberExpr`, `VisitCallExpr`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyEvent {
    DeclRef { decl: DeclId, is_direct_callee: bool },
    MemberRef { decl: DeclId, is_direct_callee: bool },
    Call { callee: CalleeKind },
}

/// A single canonicalized declaration, as the front end would hand it
/// to the consumer. Every field the analysis needs lives here instead
/// of being re-derived from a live AST.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeclRecord {
    pub id: DeclId,
    pub kind: DeclKind,
    pub name: String,
    pub file: String,
    pub range: Option<SourceRange>,

    #[serde(default)]
    pub is_system_header: bool,
    #[serde(default)]
    pub is_definition: bool,
    #[serde(default)]
    pub is_template: bool,
    #[serde(default)]
    pub is_const_qualified: bool,
    #[serde(default)]
    pub is_namespace_or_class_scope: bool,
    #[serde(default)]
    pub has_external_linkage: bool,

    #[serde(default)]
    pub overridden_methods: Vec<DeclId>,
    #[serde(default)]
    pub function_type: Option<FunctionType>,
    #[serde(default)]
    pub arity: Option<u32>,
    #[serde(default)]
    pub usr: Option<String>,
    #[serde(default)]
    pub initializer: Option<InitExpr>,
    #[serde(default)]
    pub body: Option<Vec<BodyEvent>>,
}

impl DeclRecord {
    /// `isGlobalConstant`: a namespace- or class-scope const-qualified
    /// `Var`, or any `EnumConstant`. `Field` is deliberately excluded
    /// here even though it can carry `is_const_qualified` — field-level
    /// tracking ships inert (see DESIGN.md).
    pub fn is_global_constant(&self) -> bool {
        match self.kind {
            DeclKind::EnumConstant => true,
            DeclKind::Var => self.is_const_qualified && self.is_namespace_or_class_scope,
            _ => false,
        }
    }

    pub fn loc_suffix(&self, print_loc: bool) -> String {
        if !print_loc {
            return String::new();
        }
        match self.range {
            Some(r) => format!(" -> {}-{}", r.start_line, r.end_line),
            None => String::new(),
        }
    }

    pub fn display_name(&self, use_usr: bool) -> String {
        if use_usr {
            if let Some(usr) = &self.usr {
                return format!("{}:{}", usr.len(), usr);
            }
        }
        self.name.clone()
    }

    /// The name with any enclosing namespace/class qualification dropped,
    /// e.g. `Base::f` -> `f`. `name` carries full qualification; Cppcheck
    /// output wants just the function's own name.
    pub fn unqualified_name(&self) -> &str {
        match self.name.rsplit_once("::") {
            Some((_, tail)) => tail,
            None => &self.name,
        }
    }
}
