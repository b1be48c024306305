// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 计算引擎按配置显式传入 locale, 不依赖全局语言
// ==========================================

pub use crate::config::config_manager::SUPPORTED_LOCALES;

/// 设置全局语言（命令行启动时按配置设置一次）
///
/// # 参数
/// - locale: 语言代码（"en" 或 "zh-CN"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（指定语言, 带参数）
///
/// # 示例
/// ```no_run
/// use scaleup_predictor::i18n::translate_with_args;
/// let msg = translate_with_args("en", "batch.file_not_found", &[("path", "/tmp/batch.csv")]);
/// ```
pub fn translate_with_args(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key, locale = locale).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
    // 为避免测试互相干扰，这里对修改全局语言的测试串行化。
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale_switches_default_messages() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(&*rust_i18n::locale(), "zh-CN");
        assert!(rust_i18n::t!("constraint.ema_reminder").starts_with("提醒"));

        set_locale("en");
        assert_eq!(&*rust_i18n::locale(), "en");
        assert!(rust_i18n::t!("constraint.ema_reminder").starts_with("Reminder"));
    }

    #[test]
    fn test_translate_with_args_explicit_locale() {
        let msg = translate_with_args("en", "batch.file_not_found", &[("path", "/tmp/batch.csv")]);
        assert_eq!(msg, "File not found: /tmp/batch.csv");

        let msg = translate_with_args("zh-CN", "batch.file_not_found", &[("path", "/tmp/batch.csv")]);
        assert!(msg.contains("文件不存在"));
        assert!(msg.contains("/tmp/batch.csv"));
    }

    #[test]
    fn test_every_supported_locale_has_constraint_messages() {
        for locale in SUPPORTED_LOCALES {
            let msg = translate_with_args(locale, "constraint.ema_reminder", &[]);
            assert!(msg.contains("EMA"), "{locale}: {msg}");
        }
    }
}
