pub const CONTAINER_LG: &str = "max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-6";
pub const PAGE: &str = "min-h-screen w-full bg-gradient-to-br from-gray-50 via-indigo-50 to-gray-100 dark:from-gray-900 dark:via-indigo-950 dark:to-gray-900";
pub const CARD: &str = "bg-white dark:bg-gray-800 rounded-lg shadow-lg dark:shadow-[0_4px_12px_-4px_rgba(255,255,255,0.03)] p-6";
pub const BUTTON_PRIMARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium text-white bg-gradient-to-r from-blue-600 to-blue-700 hover:from-blue-700 hover:to-blue-800 shadow-lg hover:shadow-xl transition-all duration-300 disabled:opacity-50 disabled:cursor-not-allowed";
pub const BUTTON_SECONDARY: &str = "inline-flex items-center justify-center px-4 py-2 rounded-lg font-medium border border-gray-300 dark:border-gray-600 text-gray-900 dark:text-white hover:bg-gray-50 dark:hover:bg-gray-800";
pub const BUTTON_SPIN: &str = "px-8 py-4 text-lg font-semibold text-white bg-gradient-to-r from-blue-500 to-purple-500 rounded-xl hover:from-blue-600 hover:to-purple-600 transform hover:scale-105 transition-all duration-300 shadow-lg hover:shadow-xl disabled:opacity-50 disabled:hover:scale-100 disabled:cursor-not-allowed";
pub const TAB: &str = "px-4 py-2 rounded-lg transition-all whitespace-nowrap";
pub const TAB_ACTIVE: &str = "bg-blue-500 text-white";
pub const TAB_INACTIVE: &str = "bg-gray-200 dark:bg-gray-700 text-gray-700 dark:text-gray-300";
pub const INPUT: &str = "mt-2 block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-2 px-3 text-gray-900 dark:text-white shadow-sm ring-1 ring-inset ring-gray-300 dark:ring-gray-700 placeholder:text-gray-400 focus:ring-2 focus:ring-blue-600";
pub const INPUT_ERROR: &str = "mt-2 block w-full rounded-lg border-0 bg-white dark:bg-gray-900 py-2 px-3 text-gray-900 dark:text-white shadow-sm ring-2 ring-inset ring-red-500 focus:ring-2 focus:ring-inset focus:ring-red-500 sm:text-sm";
pub const TEXT_H2: &str = "text-2xl font-bold text-gray-900 dark:text-white";
pub const TEXT_H3: &str = "text-xl font-bold text-gray-900 dark:text-white";
pub const TEXT_BODY: &str = "text-gray-600 dark:text-gray-300";
pub const TEXT_SMALL: &str = "text-sm text-gray-500 dark:text-gray-400";
pub const TEXT_ERROR: &str = "text-sm text-red-500 dark:text-red-400";
pub const TEXT_LABEL: &str = "block text-sm font-medium text-gray-900 dark:text-white";
pub const TEXT_HINT: &str = "text-xs text-gray-500 dark:text-gray-400 mt-1";
pub const ALERT_WARNING: &str = "p-4 mb-4 text-sm text-yellow-800 rounded-lg bg-yellow-50 dark:bg-gray-900 dark:text-yellow-400";

// Result overlay
pub const OVERLAY: &str = "fixed inset-0 z-50 flex items-center justify-center bg-black/60 backdrop-blur-sm";
pub const OVERLAY_CARD: &str = "bg-white dark:bg-gray-900 rounded-xl shadow-xl p-8 max-w-md w-full mx-4 text-center border border-gray-200/50 dark:border-gray-700/50";
pub const OVERLAY_ITEM: &str = "text-4xl font-bold text-transparent bg-clip-text bg-gradient-to-r from-blue-400 to-purple-400 my-6 break-words";

// Quick draw tables
pub const DRAW_STAGE: &str = "flex flex-col items-center justify-center min-h-[50vh] space-y-6";
pub const DRAW_GRID: &str = "grid grid-cols-3 sm:grid-cols-4 gap-4";
pub const DRAW_SLOT: &str = "w-20 h-28 rounded-lg shadow-lg flex items-center justify-center text-3xl transition-all duration-300 select-none";
pub const DRAW_SLOT_PICKABLE: &str = "cursor-pointer hover:-translate-y-1 hover:shadow-xl";
pub const SHAKE: &str = "animate-bounce";
