//! Handle type through which the graph is built.

use crate::autograd::backward_op::Op;
use crate::autograd::graph::{Graph, NodeId};
use crate::autograd::trace::GraphTrace;
use crate::error::ScalarGradError;
use crate::ops::Activation;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::ptr;

/// A scalar node in a [`Graph`], usable like a number.
///
/// `Value` is a `Copy` handle (graph reference + [`NodeId`]); every operation
/// on it appends a new node to the same graph and never changes its operands.
/// Plain `f64`s may appear on either side of `+ - * /` and are wrapped as
/// fresh leaves.
///
/// ```
/// use scalargrad_core::autograd::Graph;
///
/// let graph = Graph::new();
/// let x = graph.leaf(2.0);
/// let y = (x * 3.0).tanh();
/// y.backward();
/// assert!(x.grad() > 0.0);
/// ```
#[derive(Clone, Copy)]
pub struct Value<'g> {
    graph: &'g Graph,
    id: NodeId,
}

impl<'g> Value<'g> {
    pub(crate) fn new(graph: &'g Graph, id: NodeId) -> Self {
        Value { graph, id }
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn graph(self) -> &'g Graph {
        self.graph
    }

    pub fn data(self) -> f64 {
        self.graph.node_unchecked(self.id).data
    }

    pub fn grad(self) -> f64 {
        self.graph.node_unchecked(self.id).grad
    }

    pub fn op(self) -> Op {
        self.graph.node_unchecked(self.id).op
    }

    pub fn is_leaf(self) -> bool {
        self.op().is_leaf()
    }

    pub fn set_data(self, data: f64) {
        self.graph.update_unchecked(self.id, |node| node.data = data);
    }

    pub fn set_grad(self, grad: f64) {
        self.graph.update_unchecked(self.id, |node| node.grad = grad);
    }

    pub fn zero_grad(self) {
        self.set_grad(0.0);
    }

    fn same_graph(self, other: Value<'_>) {
        assert!(
            ptr::eq(self.graph, other.graph),
            "cannot combine values from different graphs ({} and {})",
            self.id,
            other.id
        );
    }

    fn constant(self, data: f64) -> Value<'g> {
        self.graph.leaf(data)
    }

    fn unary(self, data: f64, op: Op) -> Value<'g> {
        Value::new(self.graph, self.graph.push(data, op))
    }

    fn add_value(self, rhs: Value<'g>) -> Value<'g> {
        self.same_graph(rhs);
        self.unary(
            self.data() + rhs.data(),
            Op::Add {
                lhs: self.id,
                rhs: rhs.id,
            },
        )
    }

    fn mul_value(self, rhs: Value<'g>) -> Value<'g> {
        self.same_graph(rhs);
        self.unary(
            self.data() * rhs.data(),
            Op::Mul {
                lhs: self.id,
                rhs: rhs.id,
            },
        )
    }

    fn pow_unchecked(self, exponent: f64) -> Value<'g> {
        self.unary(
            self.data().powf(exponent),
            Op::Pow {
                base: self.id,
                exponent,
            },
        )
    }

    /// Raises the value to a constant power.
    ///
    /// # Errors
    /// `InvalidExponent` if `exponent` is NaN or infinite; no node is created.
    pub fn pow(self, exponent: f64) -> Result<Value<'g>, ScalarGradError> {
        if !exponent.is_finite() {
            return Err(ScalarGradError::InvalidExponent { exponent });
        }
        Ok(self.pow_unchecked(exponent))
    }

    /// Applies an activation function.
    pub fn activate(self, kind: Activation) -> Value<'g> {
        self.unary(
            kind.apply(self.data()),
            Op::Activate {
                kind,
                input: self.id,
            },
        )
    }

    pub fn sigmoid(self) -> Value<'g> {
        self.activate(Activation::Sigmoid)
    }

    pub fn tanh(self) -> Value<'g> {
        self.activate(Activation::Tanh)
    }

    pub fn relu(self) -> Value<'g> {
        self.activate(Activation::Relu)
    }

    /// Identity node; keeps the activation visible in graph traces.
    pub fn linear(self) -> Value<'g> {
        self.activate(Activation::Linear)
    }

    /// Differentiates this value with respect to everything it depends on.
    /// See [`Graph::backward`].
    pub fn backward(self) {
        self.graph.backward_unchecked(self.id);
    }

    /// Read-only snapshot of the subgraph rooted here. See [`Graph::trace`].
    pub fn trace(self) -> GraphTrace {
        self.graph.trace_unchecked(self.id)
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Value(data={}, grad={})", self.data(), self.grad())
    }
}

// -----------------------------------------------------------------------------
// std::ops: Value (op) Value, Value (op) f64, f64 (op) Value
// -----------------------------------------------------------------------------

impl<'g> Add for Value<'g> {
    type Output = Value<'g>;

    fn add(self, rhs: Value<'g>) -> Value<'g> {
        self.add_value(rhs)
    }
}

impl<'g> Mul for Value<'g> {
    type Output = Value<'g>;

    fn mul(self, rhs: Value<'g>) -> Value<'g> {
        self.mul_value(rhs)
    }
}

impl<'g> Neg for Value<'g> {
    type Output = Value<'g>;

    fn neg(self) -> Value<'g> {
        self * -1.0
    }
}

impl<'g> Sub for Value<'g> {
    type Output = Value<'g>;

    fn sub(self, rhs: Value<'g>) -> Value<'g> {
        self + (-rhs)
    }
}

impl<'g> Div for Value<'g> {
    type Output = Value<'g>;

    fn div(self, rhs: Value<'g>) -> Value<'g> {
        self * rhs.pow_unchecked(-1.0)
    }
}

macro_rules! impl_scalar_ops {
    ($($trait:ident :: $method:ident),* $(,)?) => {
        $(
            impl<'g> $trait<f64> for Value<'g> {
                type Output = Value<'g>;

                fn $method(self, rhs: f64) -> Value<'g> {
                    let rhs = self.constant(rhs);
                    $trait::$method(self, rhs)
                }
            }

            impl<'g> $trait<Value<'g>> for f64 {
                type Output = Value<'g>;

                fn $method(self, rhs: Value<'g>) -> Value<'g> {
                    let lhs = rhs.constant(self);
                    $trait::$method(lhs, rhs)
                }
            }
        )*
    };
}

impl_scalar_ops!(Add::add, Sub::sub, Mul::mul, Div::div);

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
