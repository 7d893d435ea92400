//! Declaration hoisting

use ember_ast::Node;

/// Reorders a block so function and class declarations come first. Relative
/// order within each group is kept.
pub fn hoist_declarations(statements: &[Node]) -> Vec<&Node> {
    let (mut declarations, rest): (Vec<&Node>, Vec<&Node>) =
        statements.iter().partition(|statement| statement.is_declaration());
    declarations.extend(rest);
    declarations
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_ast::build::*;

    fn kinds(nodes: &[&Node]) -> Vec<&'static str> {
        nodes.iter().map(|node| node.kind()).collect()
    }

    #[test]
    fn test_declarations_move_first() {
        let statements = vec![
            echo(int(1)),
            function("f", &[], vec![]),
            echo(int(2)),
            class("C", vec![]),
        ];
        let hoisted = hoist_declarations(&statements);
        assert_eq!(
            kinds(&hoisted),
            vec![
                "N_FUNCTION_STATEMENT",
                "N_CLASS_STATEMENT",
                "N_ECHO_STATEMENT",
                "N_ECHO_STATEMENT"
            ]
        );
        assert_eq!(hoisted[2], &statements[0]);
        assert_eq!(hoisted[3], &statements[2]);
    }

    #[test]
    fn test_order_within_groups_is_stable() {
        let statements = vec![
            function("b", &[], vec![]),
            echo(int(1)),
            function("a", &[], vec![]),
        ];
        let hoisted = hoist_declarations(&statements);
        assert_eq!(hoisted[0], &statements[0]);
        assert_eq!(hoisted[1], &statements[2]);
        assert_eq!(hoisted[2], &statements[1]);
    }

    #[test]
    fn test_empty_and_declaration_free_blocks() {
        assert!(hoist_declarations(&[]).is_empty());
        let statements = vec![echo(int(1)), echo(int(2))];
        let hoisted = hoist_declarations(&statements);
        assert_eq!(hoisted, statements.iter().collect::<Vec<_>>());
    }
}
