//! RcDoc-based pretty-printer with termcolor annotations for [`Expr`].
//!
//! Role
//! - Convert an `Expr` into an annotated document suitable for width-aware rendering.
//! - Provide colored output for terminals (TTY-aware) and plain strings for logs/tests.
//!
//! Syntax
//! - `forall x: Int, y: Int. Inv(x) /\ y = x + 1 => Inv(y)`
//! - Parentheses are only emitted where precedence requires them.
use std::io::{self, Write};

use pretty::{FmtWrite, RcDoc, RenderAnnotated};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::{
    expr::{Expr, ExprKind, variant::BinOp},
    sort::Sort,
    symbol::Symbol,
};

/// Default rendering width used by [`std::fmt::Display`].
pub const DEFAULT_WIDTH: usize = 80;

/// Styles used to annotate parts of the pretty-printed document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Punct, // commas, colons, periods
    /// Parentheses are colored by nesting depth so matching pairs share a color.
    Paren(u8),
    Keyword,  // forall, exists, if, then, else, true, false
    Operator, // /\, \/, =>, !, comparisons and arithmetic
    Ident,    // symbols
    Literal,  // integers
    Sort,     // Int, Bool, BitVec<n>
}

impl Style {
    fn to_color_spec(self) -> ColorSpec {
        let mut s = ColorSpec::new();
        match self {
            Style::Punct => {
                s.set_dimmed(true);
            }
            Style::Paren(depth) => {
                let fg = match depth % 4 {
                    0 => Color::Blue,
                    1 => Color::Green,
                    2 => Color::Yellow,
                    _ => Color::Magenta,
                };
                s.set_fg(Some(fg)).set_dimmed(true);
            }
            Style::Keyword => {
                s.set_fg(Some(Color::Cyan)).set_bold(true);
            }
            Style::Operator => {
                s.set_fg(Some(Color::Yellow)).set_bold(true);
            }
            Style::Ident => {
                s.set_fg(Some(Color::Green)).set_bold(true);
            }
            Style::Literal => {
                s.set_fg(Some(Color::Red));
            }
            Style::Sort => {
                s.set_fg(Some(Color::Magenta));
            }
        }
        s
    }
}

fn styled(style: Style, s: &'static str) -> RcDoc<'static, Style> {
    RcDoc::as_string(s).annotate(style)
}

fn punct(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Punct, s)
}

fn kw(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Keyword, s)
}

fn op(s: &'static str) -> RcDoc<'static, Style> {
    styled(Style::Operator, s)
}

fn ident(s: Symbol) -> RcDoc<'static, Style> {
    RcDoc::as_string(s).annotate(Style::Ident)
}

#[inline]
fn lparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string("(").annotate(Style::Paren(depth))
}

#[inline]
fn rparen(depth: u8) -> RcDoc<'static, Style> {
    RcDoc::as_string(")").annotate(Style::Paren(depth))
}

fn precedence(e: &Expr) -> u8 {
    match e.kind() {
        ExprKind::Ite(..) => 1,
        ExprKind::Forall(..) | ExprKind::Exists(..) => 2,
        ExprKind::Implies(..) => 3,
        ExprKind::Or(_) => 4,
        ExprKind::And(_) => 5,
        ExprKind::Not(_) => 6,
        ExprKind::Binary(bin, ..) if bin.is_comparison() => 7,
        ExprKind::Binary(BinOp::Add | BinOp::Sub, ..) => 8,
        ExprKind::Binary(..) => 9,
        ExprKind::Bool(_) | ExprKind::Int(_) | ExprKind::Symbol(_) | ExprKind::App(..) => 255,
    }
}

/// Whether `child`, printed as an operand of `parent`, must be parenthesized.
///
/// Operators of equal precedence only chain without parentheses when they are the same
/// associative n-ary connective; implications and comparisons never chain.
#[inline]
fn requires_parens(child: &Expr, parent: &Expr) -> bool {
    let child_prec = precedence(child);
    let parent_prec = precedence(parent);
    if parent_prec != child_prec {
        return parent_prec > child_prec;
    }

    match (parent.kind(), child.kind()) {
        (ExprKind::And(_), ExprKind::And(_)) | (ExprKind::Or(_), ExprKind::Or(_)) => false,
        (ExprKind::Binary(p, ..), ExprKind::Binary(c, ..)) => {
            !(p == c && matches!(p, BinOp::Add | BinOp::Mul))
        }
        (ExprKind::Not(_), ExprKind::Not(_)) => false,
        _ => true,
    }
}

#[inline]
fn operand_doc(e: &Expr, parent: &Expr, depth: u8) -> RcDoc<'static, Style> {
    if requires_parens(e, parent) {
        lparen(depth)
            .append(to_doc_with_depth(e, depth + 1))
            .append(rparen(depth))
            .group()
    } else {
        to_doc_with_depth(e, depth)
    }
}

fn sort_doc(sort: Sort) -> RcDoc<'static, Style> {
    RcDoc::as_string(sort).annotate(Style::Sort)
}

fn binder_doc(
    keyword: &'static str,
    binders: &[(Symbol, Sort)],
    body: &Expr,
    parent: &Expr,
    depth: u8,
) -> RcDoc<'static, Style> {
    let vars = RcDoc::intersperse(
        binders.iter().map(|(s, sort)| {
            ident(*s)
                .append(punct(":"))
                .append(RcDoc::space())
                .append(sort_doc(*sort))
        }),
        punct(",").append(RcDoc::space()),
    );

    kw(keyword)
        .append(RcDoc::space())
        .append(vars)
        .append(punct("."))
        .append(RcDoc::line())
        .append(operand_doc(body, parent, depth))
        .nest(2)
        .group()
}

fn nary_doc(ops: &[Expr], sep: &'static str, parent: &Expr, depth: u8) -> RcDoc<'static, Style> {
    RcDoc::intersperse(
        ops.iter().map(|o| operand_doc(o, parent, depth)),
        RcDoc::line().append(op(sep)).append(RcDoc::space()),
    )
    .group()
}

/// Depth-aware document builder that colors parentheses by nesting level.
fn to_doc_with_depth(e: &Expr, depth: u8) -> RcDoc<'static, Style> {
    match e.kind() {
        ExprKind::Bool(true) => kw("true"),
        ExprKind::Bool(false) => kw("false"),
        ExprKind::Int(v) => RcDoc::as_string(v).annotate(Style::Literal),
        ExprKind::Symbol(s) => ident(*s),
        ExprKind::Not(inner) => op("!").append(operand_doc(inner, e, depth)).group(),
        ExprKind::And(ops) => nary_doc(ops, "/\\", e, depth),
        ExprKind::Or(ops) => nary_doc(ops, "\\/", e, depth),
        ExprKind::Implies(lhs, rhs) => operand_doc(lhs, e, depth)
            .append(RcDoc::space())
            .append(op("=>"))
            .append(RcDoc::line())
            .append(operand_doc(rhs, e, depth))
            .nest(2)
            .group(),
        ExprKind::Binary(bin, lhs, rhs) => operand_doc(lhs, e, depth)
            .append(RcDoc::space())
            .append(op((*bin).into()))
            .append(RcDoc::space())
            .append(operand_doc(rhs, e, depth))
            .group(),
        ExprKind::Ite(c, t, f) => kw("if")
            .append(RcDoc::space())
            .append(operand_doc(c, e, depth))
            .append(RcDoc::line())
            .append(kw("then"))
            .append(RcDoc::space())
            .append(operand_doc(t, e, depth))
            .append(RcDoc::line())
            .append(kw("else"))
            .append(RcDoc::space())
            .append(operand_doc(f, e, depth))
            .group()
            .nest(2),
        ExprKind::Forall(binders, body) => binder_doc("forall", binders, body, e, depth),
        ExprKind::Exists(binders, body) => binder_doc("exists", binders, body, e, depth),
        ExprKind::App(func, args) => ident(*func)
            .append(lparen(depth))
            .append(RcDoc::intersperse(
                args.iter().map(|a| to_doc_with_depth(a, depth + 1)),
                punct(",").append(RcDoc::space()),
            ))
            .append(rparen(depth))
            .group(),
    }
}

// A writer that maps Style annotations to termcolor ColorSpec on a WriteColor sink.
struct ColorWriter<'w, W: WriteColor + Write> {
    out: &'w mut W,
}

impl<'a, 'w, W: WriteColor + Write> RenderAnnotated<'a, Style> for ColorWriter<'w, W> {
    fn push_annotation(&mut self, ann: &'a Style) -> io::Result<()> {
        self.out.set_color(&ann.to_color_spec())
    }
    fn pop_annotation(&mut self) -> io::Result<()> {
        self.out.reset()
    }
}

impl<'w, W: WriteColor + Write> pretty::Render for ColorWriter<'w, W> {
    type Error = io::Error;
    fn write_str(&mut self, s: &str) -> io::Result<usize> {
        self.out.write_all(s.as_bytes())?;
        Ok(s.len())
    }
    fn write_str_all(&mut self, s: &str) -> io::Result<()> {
        self.out.write_all(s.as_bytes())
    }
    fn fail_doc(&self) -> Self::Error {
        io::Error::other("render failed")
    }
}

impl Expr {
    /// Build an RcDoc representation of this expression with style annotations.
    pub fn pretty_doc(&self) -> RcDoc<'static, Style> {
        to_doc_with_depth(self, 0)
    }

    /// Render this expression with colors to any termcolor writer at the given width.
    pub fn pretty_render_to<W: WriteColor + Write>(&self, width: usize, out: &mut W) -> io::Result<()> {
        let mut cw = ColorWriter { out };
        self.pretty_doc().render_raw(width, &mut cw)
    }

    /// Print this expression to stdout with colors (TTY-aware).
    pub fn pretty_print(&self, width: usize) -> io::Result<()> {
        let stdout = StandardStream::stdout(ColorChoice::Auto);
        let mut stdout = stdout.lock();
        self.pretty_render_to(width, &mut stdout)
    }

    /// Format this expression into a plain string (no colors) at the given width.
    pub fn pretty(&self, width: usize) -> String {
        let mut buf = String::new();
        let _ = self.pretty_doc().render_fmt(width, &mut buf);
        buf
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut w = FmtWrite::new(f);
        self.pretty_doc().render_raw(DEFAULT_WIDTH, &mut w)
    }
}

impl std::fmt::Debug for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "`{}`", self)
    }
}
