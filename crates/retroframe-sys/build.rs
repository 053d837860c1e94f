fn main() {
    println!("cargo:rerun-if-changed=src/log_shim.c");

    // retro_log_printf_t is C-variadic; stable Rust can only call such functions.
    // The shim formats the line in C and forwards it to a fixed-arity sink.
    cc::Build::new()
        .file("src/log_shim.c")
        .warnings(true)
        .compile("retroframe_log_shim");
}
