/*
 * Responsibility
 * - handler から呼ばれるユースケース (survey)
 */
pub mod survey;
