use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Ru,
    En,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Ru,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Ru => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.file" => if ru { "Файл" } else { "File" },
        "menu.new" => if ru { "Новая комната" } else { "New room" },
        "menu.open" => if ru { "Открыть комнату..." } else { "Open Room..." },
        "menu.open_title" => if ru { "Открыть JSON комнаты" } else { "Open Room JSON" },
        "menu.save" => if ru { "Сохранить комнату..." } else { "Save Room..." },
        "menu.save_title" => if ru { "Сохранить JSON комнаты" } else { "Save Room JSON" },
        "menu.export_glb" => if ru { "Экспорт GLB..." } else { "Export GLB..." },
        "menu.export_glb_title" => if ru { "Экспорт GLB" } else { "Export GLB" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.sidebar" => if ru { "Боковая панель" } else { "Sidebar" },
        "menu.properties" => if ru { "Свойства" } else { "Properties" },
        "menu.chat" => if ru { "Чат дизайна" } else { "Design chat" },
        "menu.reset_camera" => if ru { "Сбросить камеру" } else { "Reset camera" },
        "menu.language" => if ru { "Язык" } else { "Language" },
        "menu.settings" => if ru { "Настройки..." } else { "Settings..." },

        "menu.account" => if ru { "Аккаунт" } else { "Account" },
        "menu.login" => if ru { "Войти..." } else { "Log in..." },
        "menu.logout" => if ru { "Выйти" } else { "Log out" },
        "menu.save_cloud" => if ru { "Сохранить в облако" } else { "Save to cloud" },
        "menu.load_cloud" => if ru { "Загрузить из облака" } else { "Load from cloud" },

        // ── Sidebar tabs ────────────────────────────────────
        "tab.scene" => if ru { "Сцена" } else { "Scene" },
        "tab.toolbox" => if ru { "Тулбокс" } else { "Toolbox" },
        "tab.shop" => if ru { "Магазин" } else { "Shop" },

        // ── Capture ─────────────────────────────────────────
        "capture.title" => if ru { "Фото → воксели" } else { "Photo → voxels" },
        "capture.mode_room" => if ru { "Комната" } else { "Room" },
        "capture.mode_object" => if ru { "Объект" } else { "Object" },
        "capture.pick_photo" => if ru { "Выбрать фото..." } else { "Pick photo..." },
        "capture.pick_title" => if ru { "Выбрать фотографию" } else { "Pick a photo" },
        "capture.voxelize_room" => if ru { "Воксели из фото комнаты" } else { "Voxelize room" },
        "capture.voxelize_object" => if ru { "Извлечь объект" } else { "Extract object" },
        "capture.processing" => if ru { "Генерация..." } else { "Processing..." },
        "capture.room_size" => if ru { "Размер комнаты (футы)" } else { "Room size (feet)" },
        "capture.clear_room" => if ru { "Очистить комнату" } else { "Clear room" },

        // ── Scene tree ──────────────────────────────────────
        "scene.title" => if ru { "Объекты" } else { "Objects" },
        "scene.empty" => if ru { "В комнате пусто" } else { "The room is empty" },

        // ── Toolbox ─────────────────────────────────────────
        "toolbox.title" => if ru { "Тулбокс" } else { "Toolbox" },
        "toolbox.empty" => if ru { "Нет сохранённых объектов" } else { "No saved assets" },
        "toolbox.place" => if ru { "Поставить в комнату" } else { "Place into room" },

        // ── Marketplace ─────────────────────────────────────
        "market.search" => if ru { "Поиск в магазине..." } else { "Search shop..." },
        "market.empty" => if ru { "Ничего не найдено" } else { "No items found" },
        "market.add_to_room" => if ru { "В комнату" } else { "Add to room" },
        "market.delete" => if ru { "Удалить" } else { "Delete" },
        "market.login_hint" => if ru { "Войдите, чтобы публиковать" } else { "Log in to sell" },
        "market.publish" => if ru { "Опубликовать" } else { "Publish" },
        "market.listing_title" => if ru { "Продать объект" } else { "List for sale" },
        "market.name" => if ru { "Название" } else { "Name" },
        "market.price" => if ru { "Цена" } else { "Price" },
        "market.description" => if ru { "Описание" } else { "Description" },
        "market.category" => if ru { "Категория" } else { "Category" },

        // ── Properties ──────────────────────────────────────
        "props.title" => if ru { "Свойства" } else { "Properties" },
        "props.none" => if ru { "Ничего не выбрано" } else { "Nothing selected" },
        "props.parts" => if ru { "Части" } else { "Components" },
        "props.keys_move" => if ru { "Стрелки — перемещение" } else { "Arrows — move" },
        "props.keys_vertical" => if ru { "Q / E — вверх/вниз" } else { "Q / E — up/down" },
        "props.keys_rotate" => if ru { "R — поворот" } else { "R — rotate" },
        "props.save_asset" => if ru { "В тулбокс" } else { "Save asset" },
        "props.sell" => if ru { "Продать" } else { "Sell" },
        "props.delete" => if ru { "Удалить" } else { "Delete" },

        // ── Chat ────────────────────────────────────────────
        "chat.title" => if ru { "Чат дизайна" } else { "Design chat" },
        "chat.clear" => if ru { "Очистить" } else { "Clear" },
        "chat.clear_tip" => if ru { "Очистить историю" } else { "Clear history" },
        "chat.placeholder" => if ru { "Опишите, что изменить в комнате" } else { "Describe what to change" },
        "chat.examples" => if ru { "Например:" } else { "For example:" },
        "chat.example1" => if ru { "Добавь уютный ковёр" } else { "Add a cozy rug" },
        "chat.example2" => if ru { "Убери лампу" } else { "Remove the lamp" },
        "chat.example3" => if ru { "Добавь торшер в угол" } else { "Add a floor lamp in the corner" },
        "chat.ask" => if ru { "Спросить..." } else { "Ask..." },
        "chat.send_tip" => if ru { "Отправить" } else { "Send" },
        "chat.thinking" => if ru { "Думаю..." } else { "Thinking..." },
        "chat.retry" => if ru { "Повторить" } else { "Retry" },
        "chat.you" => if ru { "Вы" } else { "You" },
        "chat.no_room" => if ru { "Сначала создайте комнату" } else { "Create a room first" },

        // ── Auth dialog ─────────────────────────────────────
        "auth.login_title" => if ru { "Вход" } else { "Welcome back" },
        "auth.register_title" => if ru { "Регистрация" } else { "Create account" },
        "auth.email" => "Email",
        "auth.password" => if ru { "Пароль" } else { "Password" },
        "auth.login" => if ru { "Войти" } else { "Log in" },
        "auth.register" => if ru { "Создать аккаунт" } else { "Sign up" },
        "auth.to_register" => if ru { "Нет аккаунта? Регистрация" } else { "New here? Create account" },
        "auth.to_login" => if ru { "Уже есть аккаунт? Войти" } else { "Have an account? Log in" },

        // ── Viewport ────────────────────────────────────────
        "viewport.ready" => if ru { "Готов строить" } else { "Ready to build" },
        "viewport.ready_hint" => if ru { "Сфотографируйте комнату, чтобы создать воксели" } else { "Snap a photo to generate voxel blocks" },

        // ── Settings window ─────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.server" => if ru { "Адрес сервера" } else { "Server URL" },
        "settings.font_size" => if ru { "Размер шрифта" } else { "Font size" },

        // ── Status bar ──────────────────────────────────────
        "status.objects" => if ru { "объектов" } else { "objects" },
        "status.selected" => if ru { "выбран" } else { "selected" },
        "status.part" => if ru { "часть" } else { "part" },
        "status.no_room" => if ru { "нет комнаты" } else { "no room" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translations_switch() {
        set_lang(Lang::En);
        assert_eq!(t("menu.file"), "File");
        set_lang(Lang::Ru);
        assert_eq!(t("menu.file"), "Файл");
    }

    #[test]
    fn test_unknown_key_fallback() {
        assert_eq!(t("nonexistent.key"), "???");
    }
}
