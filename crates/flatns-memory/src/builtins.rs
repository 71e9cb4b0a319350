use flatns_core::NonLocalExit;

use crate::host::MemoryHost;
use crate::value::{Function, Value};

pub const FEATURES_VAR: &str = "features";

pub(crate) fn install(host: &MemoryHost) {
    let builtins = [
        Function::native("list", 0, None, |_, args| Ok(Value::List(args))),
        Function::native("+", 0, None, plus),
        Function::native("signal", 2, Some(2), |_, mut args| {
            let data = args.pop().unwrap_or(Value::Nil);
            let symbol = args.pop().unwrap_or(Value::Nil);
            Err(NonLocalExit::signal(symbol, data))
        }),
        Function::native("throw", 2, Some(2), |_, mut args| {
            let value = args.pop().unwrap_or(Value::Nil);
            let tag = args.pop().unwrap_or(Value::Nil);
            Err(NonLocalExit::throw(tag, value))
        }),
        Function::native("featurep", 1, Some(1), |host, args| {
            Ok(Value::from(has_feature(host, &args[0])))
        }),
        Function::native("provide", 1, Some(1), provide),
        Function::native("require", 1, Some(3), require),
    ];
    for function in builtins {
        let name = function.name().to_string();
        host.put_function(&name, Value::Function(function));
    }
    host.put_value(FEATURES_VAR, Value::Nil);
}

fn plus(host: &MemoryHost, args: Vec<Value>) -> Result<Value, NonLocalExit<Value>> {
    let mut int_sum: i64 = 0;
    let mut float_sum: Option<f64> = None;
    for arg in args {
        match arg {
            Value::Int(n) => match float_sum.as_mut() {
                Some(sum) => *sum += n as f64,
                None => match int_sum.checked_add(n) {
                    Some(sum) => int_sum = sum,
                    None => {
                        return Err(host.signal(
                            "overflow-error",
                            vec![Value::Int(int_sum), Value::Int(n)],
                        ))
                    }
                },
            },
            Value::Float(n) => {
                *float_sum.get_or_insert(int_sum as f64) += n;
            }
            other => {
                return Err(host.signal(
                    "wrong-type-argument",
                    vec![host.sym("number-or-marker-p"), other],
                ))
            }
        }
    }
    Ok(match float_sum {
        Some(sum) => Value::Float(sum),
        None => Value::Int(int_sum),
    })
}

fn features(host: &MemoryHost) -> Vec<Value> {
    match host.lookup(FEATURES_VAR) {
        Some(Value::List(items)) => items,
        _ => Vec::new(),
    }
}

fn has_feature(host: &MemoryHost, feature: &Value) -> bool {
    features(host).iter().any(|item| item == feature)
}

fn provide(host: &MemoryHost, args: Vec<Value>) -> Result<Value, NonLocalExit<Value>> {
    let feature = args.into_iter().next().unwrap_or(Value::Nil);
    if feature.as_symbol().is_none() {
        return Err(host.signal(
            "wrong-type-argument",
            vec![host.sym("symbolp"), feature],
        ));
    }
    if !has_feature(host, &feature) {
        let mut items = features(host);
        items.insert(0, feature.clone());
        host.put_value(FEATURES_VAR, Value::List(items));
    }
    Ok(feature)
}

fn require(host: &MemoryHost, args: Vec<Value>) -> Result<Value, NonLocalExit<Value>> {
    let feature = args.into_iter().next().unwrap_or(Value::Nil);
    if has_feature(host, &feature) {
        return Ok(feature);
    }
    let name = match &feature {
        Value::Symbol(symbol) => symbol.name().to_string(),
        other => format!("{:?}", other),
    };
    Err(host.signal(
        "file-missing",
        vec![
            Value::str("Cannot open load file"),
            Value::str("No such file or directory"),
            Value::Str(name),
        ],
    ))
}
