//! Class definition compilation

use crate::compiler::context::CompilationContext;
use crate::compiler::expr::{ExprCompiler, variable_name};
use crate::compiler::function::FunctionCompiler;
use crate::error::{CompileError, CompileResult, Position};
use crate::ir::{ClassDefinition, Expr};
use ember_ast::Node;
use indexmap::IndexMap;
use std::rc::Rc;
use tracing::debug;

pub struct ClassCompiler;

impl ClassCompiler {
    pub fn compile(
        ctx: &mut CompilationContext,
        class_name: &Node,
        members: &[Node],
    ) -> CompileResult<ClassDefinition> {
        let name = ExprCompiler::compile_value(ctx, class_name)?;
        let mut properties = IndexMap::new();
        let mut methods = IndexMap::new();

        for member in members {
            match member {
                Node::PropertyDefinition { variable, value } => {
                    let Node::Variable { variable: property, .. } = variable.as_ref() else {
                        return Err(CompileError::unsupported(variable.kind(), Position::ClassMember));
                    };
                    let default = match value {
                        Some(value) => ExprCompiler::compile_value(ctx, value)?,
                        None => Expr::Null,
                    };
                    properties.insert(variable_name(property).to_string(), default);
                }
                Node::MethodDefinition {
                    func,
                    args,
                    statements,
                } => {
                    let Node::String { string: method_name } = func.as_ref() else {
                        return Err(CompileError::unsupported(func.kind(), Position::MethodName));
                    };
                    let method = FunctionCompiler::compile_method(method_name, args, statements)?;
                    methods.insert(method_name.clone(), Rc::new(method));
                }
                other => {
                    return Err(CompileError::unsupported(other.kind(), Position::ClassMember));
                }
            }
        }

        if let Expr::String(class) = &name {
            debug!(
                class = class.as_str(),
                properties = properties.len(),
                methods = methods.len(),
                "compiled class"
            );
        }

        Ok(ClassDefinition {
            name,
            properties,
            methods,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_ast::build::*;

    #[test]
    fn test_members_keep_declaration_order() {
        let mut ctx = CompilationContext::new();
        let class = ClassCompiler::compile(
            &mut ctx,
            &bare("Point"),
            &[
                property("$x", Some(int(0))),
                property("y", None),
                method("getX", &[], vec![ret(Some(prop(var("this"), &["x"])))]),
            ],
        )
        .unwrap();

        assert_eq!(class.name, Expr::String("Point".to_string()));
        assert_eq!(
            class.properties.keys().collect::<Vec<_>>(),
            vec!["x", "y"]
        );
        assert_eq!(class.properties["x"], Expr::Integer(0));
        assert_eq!(class.properties["y"], Expr::Null);
        assert!(class.methods.contains_key("getX"));
    }

    #[test]
    fn test_property_defaults_do_not_declare_locals() {
        let mut ctx = CompilationContext::new();
        ClassCompiler::compile(&mut ctx, &bare("C"), &[property("p", Some(int(1)))]).unwrap();
        assert!(ctx.local_variable_names.is_empty());
    }

    #[test]
    fn test_unknown_member_is_rejected() {
        let mut ctx = CompilationContext::new();
        let result = ClassCompiler::compile(&mut ctx, &bare("C"), &[echo(int(1))]);
        assert!(matches!(
            result,
            Err(CompileError::UnsupportedConstruct {
                kind: "N_ECHO_STATEMENT",
                position: Position::ClassMember
            })
        ));
    }

    #[test]
    fn test_method_name_must_be_bare_word() {
        let mut ctx = CompilationContext::new();
        let member = Node::MethodDefinition {
            func: Box::new(var("f")),
            args: vec![],
            statements: vec![],
        };
        let result = ClassCompiler::compile(&mut ctx, &bare("C"), &[member]);
        assert!(matches!(
            result,
            Err(CompileError::UnsupportedConstruct {
                position: Position::MethodName,
                ..
            })
        ));
    }
}
