use crate::{
    ast::{AssignTarget, Expr, LiteralValue, PatternElement},
    interpreter::value::core::format_number,
    util::stack::ensure_sufficient_stack,
};

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const CONTINUE: &str = "│   ";
const EMPTY: &str = "    ";

/// Intermediate outline node: a label and its children.
struct TreeNode {
    label:    String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn leaf(label: impl Into<String>) -> Self {
        Self { label:    label.into(),
               children: Vec::new(), }
    }

    fn with_children(label: impl Into<String>, children: Vec<Self>) -> Self {
        Self { label: label.into(),
               children }
    }
}

/// Renders an expression tree as an indented outline, one node per line.
///
/// # Example
/// ```
/// let program = itchy::parse("x := 1 + 2").unwrap();
/// let tree = itchy::ast::printer::render_tree(&program);
/// assert_eq!(tree,
///            "Block\n\
///             └── Assignment :=\n    \
///                 ├── Name x\n    \
///                 └── BinaryOp +\n        \
///                     ├── Literal 1\n        \
///                     └── Literal 2\n");
/// ```
#[must_use]
pub fn render_tree(expr: &Expr) -> String {
    let root = build(expr);
    let mut out = format!("{}\n", root.label);
    render_children(&root, "", &mut out);
    out
}

fn render_children(node: &TreeNode, indent: &str, out: &mut String) {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        out.push_str(indent);
        out.push_str(if last { LAST_BRANCH } else { BRANCH });
        out.push_str(&child.label);
        out.push('\n');

        let nested = format!("{indent}{}", if last { EMPTY } else { CONTINUE });
        ensure_sufficient_stack(|| render_children(child, &nested, out));
    }
}

fn build(expr: &Expr) -> TreeNode {
    ensure_sufficient_stack(|| build_node(expr))
}

fn build_node(expr: &Expr) -> TreeNode {
    match expr {
        Expr::Literal { value, .. } => TreeNode::leaf(format!("Literal {}", literal_label(value))),
        Expr::Identifier { name, .. } => TreeNode::leaf(format!("Identifier {name}")),
        Expr::Assignment { target, op, value, .. } => {
            TreeNode::with_children(format!("Assignment {op}"), vec![build_target(target), build(value)])
        },
        Expr::BinaryOp { left, op, right, .. } => {
            TreeNode::with_children(format!("BinaryOp {op}"), vec![build(left), build(right)])
        },
        Expr::Comparison { first, links, .. } => {
            let mut children = vec![build(first)];
            children.extend(links.iter().map(|link| {
                                            TreeNode::with_children(link.op.to_string(),
                                                                    vec![build(&link.operand)])
                                        }));
            TreeNode::with_children("Comparison", children)
        },
        Expr::UnaryOp { op, operand, .. } => {
            TreeNode::with_children(format!("UnaryOp {op}"), vec![build(operand)])
        },
        Expr::Length { operand, .. } => TreeNode::with_children("Length", vec![build(operand)]),
        Expr::Spread { operand, .. } => TreeNode::with_children("Spread", vec![build(operand)]),
        Expr::Block { body, .. } => TreeNode::with_children("Block", body.iter().map(build).collect()),
        Expr::If { branches,
                   else_branch,
                   .. } => {
            let mut children: Vec<TreeNode> =
                branches.iter()
                        .map(|branch| {
                            TreeNode::with_children("Branch",
                                                    vec![build(&branch.condition),
                                                         build(&branch.body)])
                        })
                        .collect();
            if let Some(body) = else_branch {
                children.push(TreeNode::with_children("Else", vec![build(body)]));
            }
            TreeNode::with_children("If", children)
        },
        Expr::While { condition, body, .. } => {
            TreeNode::with_children("While", vec![build(condition), build(body)])
        },
        Expr::Function { params, body, .. } => {
            TreeNode::with_children(format!("Function({})", params.join(", ")), vec![build(body)])
        },
        Expr::Call { callee, arguments, .. } => {
            let mut children = vec![build(callee)];
            children.extend(arguments.iter().map(build));
            TreeNode::with_children("Call", children)
        },
        Expr::Index { collection, index, .. } => {
            TreeNode::with_children("Index", vec![build(collection), build(index)])
        },
        Expr::List { elements, .. } => {
            TreeNode::with_children("List", elements.iter().map(build).collect())
        },
    }
}

fn build_target(target: &AssignTarget) -> TreeNode {
    ensure_sufficient_stack(|| build_target_node(target))
}

fn build_target_node(target: &AssignTarget) -> TreeNode {
    match target {
        AssignTarget::Name(name) => TreeNode::leaf(format!("Name {name}")),
        AssignTarget::Index { collection, index } => {
            TreeNode::with_children("Index", vec![build(collection), build(index)])
        },
        AssignTarget::Pattern(elements) => {
            let children = elements.iter()
                                   .map(|element| match element {
                                       PatternElement::Single(target) => build_target(target),
                                       PatternElement::Rest(target) => {
                                           TreeNode::with_children("Rest", vec![build_target(target)])
                                       },
                                   })
                                   .collect();
            TreeNode::with_children("Pattern", children)
        },
    }
}

fn literal_label(value: &LiteralValue) -> String {
    match value {
        LiteralValue::Null => "null".to_string(),
        LiteralValue::Bool(b) => b.to_string(),
        LiteralValue::Number(n) => format_number(*n),
        LiteralValue::Str(s) => format!("{s:?}"),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::render_tree;
    use crate::parse;

    #[test]
    fn conditional_with_else() {
        let program = parse("if (a) 1 elif (b) 2 else \"c\"").unwrap();
        assert_eq!(render_tree(&program),
                   "\
Block
└── If
    ├── Branch
    │   ├── Identifier a
    │   └── Block
    │       └── Literal 1
    ├── Branch
    │   ├── Identifier b
    │   └── Block
    │       └── Literal 2
    └── Else
        └── Block
            └── Literal \"c\"
");
    }

    #[test]
    fn function_call_and_pattern() {
        let program = parse("[x, ...rest] := f(...xs, 2)").unwrap();
        assert_eq!(render_tree(&program),
                   "\
Block
└── Assignment :=
    ├── Pattern
    │   ├── Name x
    │   └── Rest
    │       └── Name rest
    └── Call
        ├── Identifier f
        ├── Spread
        │   └── Identifier xs
        └── Literal 2
");
    }

    #[test]
    fn comparison_chain() {
        let program = parse("0 <= i < n").unwrap();
        assert_eq!(render_tree(&program),
                   "\
Block
└── Comparison
    ├── Literal 0
    ├── <=
    │   └── Identifier i
    └── <
        └── Identifier n
");
    }

    #[test]
    fn deeply_nested_lists_render() {
        let depth = 3000;
        let source = format!("{}1{}", "[".repeat(depth), "]".repeat(depth));
        let tree = render_tree(&parse(&source).unwrap());

        assert_eq!(tree.lines().count(), depth + 2);
        assert_eq!(tree.lines().filter(|line| line.ends_with("List")).count(), depth);
        assert!(tree.ends_with("└── Literal 1\n"));
    }

    #[test]
    fn empty_block_has_no_children() {
        let program = parse("").unwrap();
        assert_eq!(render_tree(&program), "Block\n");
    }
}
