/// Arithmetic syntax tree. Leaves are literals and the free variable `x`;
/// there is no other way to reach data from inside an expression.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Expr {
    Num(f64),
    Var,
    Neg(Box<Expr>),
    Binary(BinOp, Box<Expr>, Box<Expr>),
    Call(Function, Vec<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl BinOp {
    #[must_use]
    pub(crate) fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div | Self::Rem => 2,
            Self::Pow => 3,
        }
    }

    fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
            Self::Rem => left % right,
            Self::Pow => left.powf(right),
        }
    }
}

impl Expr {
    /// Tree-walking evaluation. Never fails; non-finite results are reported by
    /// the caller.
    #[must_use]
    pub(crate) fn eval(&self, x: f64) -> f64 {
        match self {
            Self::Num(value) => *value,
            Self::Var => x,
            Self::Neg(operand) => -operand.eval(x),
            Self::Binary(op, left, right) => op.apply(left.eval(x), right.eval(x)),
            Self::Call(function, args) => match args.as_slice() {
                [arg] => function.apply_unary(arg.eval(x)),
                _ => {
                    let values: Vec<f64> = args.iter().map(|arg| arg.eval(x)).collect();
                    function.apply(&values)
                }
            },
        }
    }
}

/// Named constants available to expressions, with and without the `Math.` prefix.
pub(crate) fn lookup_constant(name: &str) -> Option<f64> {
    let value = match name {
        "pi" | "PI" | "Math.PI" => std::f64::consts::PI,
        "e" | "E" | "Math.E" => std::f64::consts::E,
        "tau" => std::f64::consts::TAU,
        "Math.LN2" => std::f64::consts::LN_2,
        "Math.LN10" => std::f64::consts::LN_10,
        "Math.LOG2E" => std::f64::consts::LOG2_E,
        "Math.LOG10E" => std::f64::consts::LOG10_E,
        "Math.SQRT2" => std::f64::consts::SQRT_2,
        "Math.SQRT1_2" => std::f64::consts::FRAC_1_SQRT_2,
        _ => return None,
    };
    Some(value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    Exact(usize),
    AtLeast(usize),
}

impl Arity {
    pub(crate) fn accepts(self, count: usize) -> bool {
        match self {
            Self::Exact(expected) => count == expected,
            Self::AtLeast(min) => count >= min,
        }
    }

    pub(crate) fn describe(self) -> String {
        match self {
            Self::Exact(expected) => expected.to_string(),
            Self::AtLeast(min) => format!("at least {min}"),
        }
    }
}

/// Allow-listed callable functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Sinh,
    Cosh,
    Tanh,
    Asinh,
    Acosh,
    Atanh,
    Exp,
    Expm1,
    Ln,
    Log10,
    Log2,
    Log1p,
    Sqrt,
    Cbrt,
    Abs,
    Sign,
    Floor,
    Ceil,
    Round,
    Trunc,
    Pow,
    Hypot,
    Min,
    Max,
}

impl Function {
    pub(crate) fn lookup(name: &str) -> Option<Self> {
        let bare = name.strip_prefix("Math.").unwrap_or(name);
        let function = match bare {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "atan2" => Self::Atan2,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "asinh" => Self::Asinh,
            "acosh" => Self::Acosh,
            "atanh" => Self::Atanh,
            "exp" => Self::Exp,
            "expm1" => Self::Expm1,
            "log" | "ln" => Self::Ln,
            "log10" => Self::Log10,
            "log2" => Self::Log2,
            "log1p" => Self::Log1p,
            "sqrt" => Self::Sqrt,
            "cbrt" => Self::Cbrt,
            "abs" => Self::Abs,
            "sign" => Self::Sign,
            "floor" => Self::Floor,
            "ceil" => Self::Ceil,
            "round" => Self::Round,
            "trunc" => Self::Trunc,
            "pow" => Self::Pow,
            "hypot" => Self::Hypot,
            "min" => Self::Min,
            "max" => Self::Max,
            _ => return None,
        };
        Some(function)
    }

    pub(crate) fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Atan2 => "atan2",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Asinh => "asinh",
            Self::Acosh => "acosh",
            Self::Atanh => "atanh",
            Self::Exp => "exp",
            Self::Expm1 => "expm1",
            Self::Ln => "log",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Log1p => "log1p",
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Abs => "abs",
            Self::Sign => "sign",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Trunc => "trunc",
            Self::Pow => "pow",
            Self::Hypot => "hypot",
            Self::Min => "min",
            Self::Max => "max",
        }
    }

    pub(crate) fn arity(self) -> Arity {
        match self {
            Self::Atan2 | Self::Pow => Arity::Exact(2),
            Self::Hypot | Self::Min | Self::Max => Arity::AtLeast(1),
            _ => Arity::Exact(1),
        }
    }

    fn apply_unary(self, v: f64) -> f64 {
        match self {
            Self::Sin => v.sin(),
            Self::Cos => v.cos(),
            Self::Tan => v.tan(),
            Self::Asin => v.asin(),
            Self::Acos => v.acos(),
            Self::Atan => v.atan(),
            Self::Sinh => v.sinh(),
            Self::Cosh => v.cosh(),
            Self::Tanh => v.tanh(),
            Self::Asinh => v.asinh(),
            Self::Acosh => v.acosh(),
            Self::Atanh => v.atanh(),
            Self::Exp => v.exp(),
            Self::Expm1 => v.exp_m1(),
            Self::Ln => v.ln(),
            Self::Log10 => v.log10(),
            Self::Log2 => v.log2(),
            Self::Log1p => v.ln_1p(),
            Self::Sqrt => v.sqrt(),
            Self::Cbrt => v.cbrt(),
            Self::Abs => v.abs(),
            Self::Sign => sign(v),
            Self::Floor => v.floor(),
            Self::Ceil => v.ceil(),
            Self::Round => round_half_up(v),
            Self::Trunc => v.trunc(),
            Self::Hypot => v.abs(),
            Self::Min | Self::Max => v,
            // Binary functions never reach here: arity is checked at parse time.
            Self::Atan2 | Self::Pow => f64::NAN,
        }
    }

    fn apply(self, args: &[f64]) -> f64 {
        match (self, args) {
            (Self::Atan2, [y, x]) => y.atan2(*x),
            (Self::Pow, [base, exponent]) => base.powf(*exponent),
            (Self::Hypot, _) => args.iter().map(|v| v * v).sum::<f64>().sqrt(),
            (Self::Min, _) => fold_extreme(args, f64::min),
            (Self::Max, _) => fold_extreme(args, f64::max),
            (_, [single]) => self.apply_unary(*single),
            _ => f64::NAN,
        }
    }
}

fn sign(v: f64) -> f64 {
    if v.is_nan() || v == 0.0 { v } else { v.signum() }
}

// Halves round toward positive infinity: round(-2.5) == -2.
fn round_half_up(v: f64) -> f64 {
    let floor = v.floor();
    if v - floor >= 0.5 { floor + 1.0 } else { floor }
}

// NaN in any argument poisons the result, unlike `f64::min`/`f64::max`.
fn fold_extreme(args: &[f64], pick: fn(f64, f64) -> f64) -> f64 {
    if args.iter().any(|v| v.is_nan()) {
        return f64::NAN;
    }
    args.iter().copied().reduce(pick).unwrap_or(f64::NAN)
}
