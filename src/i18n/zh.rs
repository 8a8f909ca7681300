//! Simplified Chinese catalog.

pub(super) const CATALOG: &[(&str, &str)] = &[
    // Main menu
    ("app_title", "BioFlow-CLI  生物信息学工作流工具"),
    ("menu_prompt", "请选择操作："),
    ("menu_env", "[环境] 安装生物工具"),
    ("menu_seq", "[序列] 格式化处理"),
    ("menu_settings", "[设置] 切换语言"),
    ("menu_exit", "[退出] 退出程序"),
    // Language selection
    ("lang_prompt", "请选择语言："),
    ("lang_saved", "语言偏好已保存。"),
    // Environment manager
    ("env_title", "环境管理器"),
    ("env_select_tool", "请选择要安装的工具："),
    ("env_installing", "正在安装 {tool}..."),
    ("env_install_ok", "{tool} 安装成功。"),
    ("env_install_fail", "{tool} 安装失败：{err}"),
    ("env_back", "返回主菜单"),
    ("env_already", "{tool} 已安装。"),
    ("env_not_found", "未找到 {tool}，准备安装。"),
    ("env_checking", "正在检查 {tool} 状态..."),
    (
        "env_conda_missing",
        "未检测到 Conda，请先安装 Conda（https://docs.conda.io/）。",
    ),
    (
        "env_conda_hint",
        "Conda 下载地址：https://docs.conda.io/en/latest/miniconda.html",
    ),
    ("env_unknown_tool", "错误：未知工具 '{tool}'"),
    ("env_available_tools", "可用工具：{tools}"),
    // Sequence tasks
    ("seq_title", "序列格式化"),
    ("seq_input_prompt", "请输入 FASTA 文件路径："),
    ("seq_output_prompt", "请输入输出文件路径："),
    ("seq_processing", "正在处理序列..."),
    ("seq_done", "完成！已格式化 {count} 条序列，保存至 {path}。"),
    ("seq_file_not_found", "文件未找到：{path}"),
    ("seq_invalid_format", "无效的 FASTA 格式。"),
    ("seq_invalid_width", "错误：宽度必须为正数（当前为 {width}）"),
    ("seq_back", "返回主菜单"),
    ("seq_wrap_prompt", "每行字符宽度（默认 80）："),
    ("seq_large_file_warn", "警告：文件大小为 {size} MB，可能占用大量内存。"),
    // General
    ("confirm_exit", "确定要退出吗？"),
    ("yes", "是"),
    ("no", "否"),
    ("goodbye", "再见！"),
    ("error_unexpected", "发生意外错误：{err}"),
    ("press_enter", "按 Enter 键继续..."),
    ("hint_list", "上/下 或 j/k：移动   Enter：选择   Esc：返回"),
    ("hint_form", "Enter：确认   Esc：取消"),
];
