//! Python sources executed by the interpreter adapter.
//!
//! Scripts are passed with `-c` and take their input from argv, never
//! from string interpolation, so no caller-supplied text is evaluated
//! as code.

/// Handles one JSON request from `argv[1]` and prints one JSON reply as
/// the last line of stdout.
pub const AGENT: &str = r#"import importlib
import json
import sys


def exception_class(exc):
    cls = type(exc)
    if cls.__module__ == "builtins":
        return cls.__qualname__
    return f"{cls.__module__}.{cls.__qualname__}"


class Failure(Exception):
    def __init__(self, reply):
        super().__init__()
        self.reply = reply


def broken(name, exc):
    return {
        "status": "broken",
        "module": name,
        "kind": exception_class(exc),
        "message": str(exc),
    }


def raised(exc):
    return {"status": "raised", "kind": exception_class(exc), "message": str(exc)}


def load(name):
    try:
        return importlib.import_module(name)
    except ModuleNotFoundError as exc:
        absent = exc.name or ""
        if absent and (name == absent or name.startswith(absent + ".")):
            raise Failure({"status": "missing", "module": name})
        raise Failure(broken(name, exc))
    except Exception as exc:
        raise Failure(broken(name, exc))


def evaluate(node, objc):
    op = node["op"]
    if op == "class":
        return objc.ObjCClass(node["name"])
    if op == "str":
        return node["value"]
    receiver = evaluate(node["receiver"], objc)
    if op == "property":
        return getattr(receiver, node["name"])
    if op == "send":
        args = [evaluate(arg, objc) for arg in node["args"]]
        kwargs = {key: evaluate(value, objc) for key, value in node["kwargs"]}
        return getattr(receiver, node["method"])(*args, **kwargs)
    raise ValueError(f"unknown bridge op {op!r}")


def handle(request):
    action = request["action"]
    if action == "load":
        load(request["module"])
        return {"status": "ok", "value": None}
    if action == "invoke":
        module = load(request["module"])
        try:
            value = getattr(module, request["function"])()
        except Exception as exc:
            return raised(exc)
        return {"status": "ok", "value": value}
    if action == "bridge":
        objc = load("rubicon.objc")
        try:
            value = evaluate(request["expr"], objc)
        except Exception as exc:
            return raised(exc)
        return {"status": "ok", "value": str(value)}
    raise ValueError(f"unknown action {action!r}")


def main():
    request = json.loads(sys.argv[1])
    try:
        reply = handle(request)
    except Failure as failure:
        reply = failure.reply
    sys.stdout.write("\n" + json.dumps(reply, default=repr) + "\n")
    sys.stdout.flush()


main()
"#;

/// Runs `argv[2:]` through the interpreter's own `subprocess` module and
/// mirrors the child's stdout, stderr and exit status. `argv[1]` is the
/// child's budget in seconds; a child still running after it is killed
/// and reaped, and the relay exits with 124.
pub const RELAY: &str = r#"import subprocess
import sys

budget = float(sys.argv[1])
argv = sys.argv[2:]
try:
    result = subprocess.run(argv, capture_output=True, timeout=budget)
except subprocess.TimeoutExpired as exc:
    sys.stdout.buffer.write(exc.stdout or b"")
    sys.stdout.buffer.flush()
    sys.stderr.buffer.write(exc.stderr or b"")
    sys.stderr.buffer.write(f"\nrelay: {' '.join(argv)} killed after {budget}s\n".encode())
    sys.stderr.buffer.flush()
    sys.exit(124)
sys.stdout.buffer.write(result.stdout)
sys.stdout.buffer.flush()
sys.stderr.buffer.write(result.stderr)
sys.stderr.buffer.flush()
sys.exit(result.returncode if result.returncode >= 0 else 128 - result.returncode)
"#;
